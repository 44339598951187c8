use crate::persistence::{ExerciseForm, HabitForm};

pub fn render_index(habit: &HabitForm, exercise: &ExerciseForm) -> String {
    INDEX_HTML
        .replace("{{HABIT_TYPE}}", &escape(&habit.habit_type))
        .replace("{{CIGARETTES_PER_DAY}}", &escape(&habit.cigarettes_per_day))
        .replace("{{CIGARETTE_PRICE}}", &escape(&habit.cigarette_price))
        .replace("{{CIGARETTES_PER_PACK}}", &escape(&habit.cigarettes_per_pack))
        .replace("{{DRINKS_PER_DAY}}", &escape(&habit.drinks_per_day))
        .replace("{{DRINK_PRICE}}", &escape(&habit.drink_price))
        .replace("{{QUIT_PERIOD}}", &escape(&habit.quit_period))
        .replace("{{EXERCISE_TYPE}}", &escape(&exercise.exercise_type))
        .replace("{{EXERCISE_DURATION}}", &escape(&exercise.exercise_duration))
        .replace("{{EXERCISE_FREQUENCY}}", &escape(&exercise.exercise_frequency))
        .replace("{{USER_WEIGHT}}", &escape(&exercise.user_weight))
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}


const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Health Habit Simulator</title>
  <script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef6f0;
      --bg-2: #bfe3cf;
      --ink: #243330;
      --accent: #2f8f6b;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e3f1ea 60%, #f4f8f5 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f6b66;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
      width: fit-content;
    }

    .tab-btn {
      background: transparent;
      border: none;
      border-radius: 999px;
      padding: 8px 16px;
      font: inherit;
      font-weight: 600;
      color: #5f6b66;
      cursor: pointer;
    }

    .tab-btn.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(47, 72, 88, 0.12);
    }

    .tab-content {
      display: none;
      gap: 24px;
    }

    .tab-content.active {
      display: grid;
    }

    .fields {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .field {
      display: grid;
      gap: 6px;
    }

    .field label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #7b847f;
    }

    .field input,
    .field select {
      border: 1px solid rgba(47, 72, 88, 0.18);
      border-radius: 12px;
      padding: 10px 12px;
      font: inherit;
      background: white;
    }

    .error-message {
      color: #c63b2b;
      font-size: 0.8rem;
      min-height: 1em;
    }

    .calc {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 143, 107, 0.3);
      width: fit-content;
    }

    .results {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b8f8a;
    }

    .stat .value {
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .chart-container {
      position: relative;
      height: 300px;
      background: white;
      border-radius: 20px;
      padding: 16px;
      opacity: 0;
      transition: opacity 400ms ease;
    }

    .chart-container.visible {
      opacity: 1;
    }

    .progress {
      display: grid;
      gap: 10px;
    }

    .progress-track {
      height: 14px;
      border-radius: 999px;
      background: rgba(47, 72, 88, 0.1);
      overflow: hidden;
    }

    #quit-progress-bar {
      height: 100%;
      width: 0%;
      background: #e74c3c;
      transition: width 400ms ease, background-color 400ms ease;
    }

    .progress-meta {
      display: flex;
      justify-content: space-between;
      color: #5f6b66;
    }

    #reset-progress {
      background: transparent;
      border: 1px solid var(--accent-2);
      border-radius: 999px;
      padding: 6px 14px;
      font: inherit;
      cursor: pointer;
      width: fit-content;
    }

    #notification {
      position: fixed;
      bottom: 20px;
      right: 20px;
      padding: 10px 20px;
      border-radius: 4px;
      background: #2ecc71;
      color: white;
      box-shadow: 0 2px 10px rgba(0, 0, 0, 0.2);
      z-index: 1000;
      transition: opacity 0.3s, transform 0.3s;
      transform: translateY(100px);
      opacity: 0;
    }

    #notification.show {
      transform: translateY(0);
      opacity: 1;
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Health Habit Simulator</h1>
      <p class="subtitle">Rough estimates of what quitting a habit or starting to exercise could do for you.</p>
    </header>

    <div class="tabs" role="tablist">
      <button class="tab-btn active" type="button" data-tab="smoking">Quit smoking / drinking</button>
      <button class="tab-btn" type="button" data-tab="exercise">Exercise</button>
    </div>

    <section id="smoking-tab" class="tab-content active">
      <div class="fields">
        <div class="field">
          <label for="habit-type">Habit</label>
          <select id="habit-type" data-selected="{{HABIT_TYPE}}">
            <option value="smoking">Smoking</option>
            <option value="drinking">Drinking</option>
          </select>
        </div>
        <div class="field smoking-specific">
          <label for="cigarettes-per-day">Cigarettes per day</label>
          <input id="cigarettes-per-day" type="number" min="0" step="1" required value="{{CIGARETTES_PER_DAY}}" />
        </div>
        <div class="field smoking-specific">
          <label for="cigarette-price">Price per pack</label>
          <input id="cigarette-price" type="number" min="0" step="0.01" required value="{{CIGARETTE_PRICE}}" />
        </div>
        <div class="field smoking-specific">
          <label for="cigarettes-per-pack">Cigarettes per pack</label>
          <input id="cigarettes-per-pack" type="number" min="1" step="1" required value="{{CIGARETTES_PER_PACK}}" />
        </div>
        <div class="field drinking-specific">
          <label for="drinks-per-day">Alcohol per day (ml)</label>
          <input id="drinks-per-day" type="number" min="0" step="1" required value="{{DRINKS_PER_DAY}}" />
        </div>
        <div class="field drinking-specific">
          <label for="drink-price">Price per liter</label>
          <input id="drink-price" type="number" min="0" step="0.01" required value="{{DRINK_PRICE}}" />
        </div>
        <div class="field">
          <label for="quit-period">Quit period</label>
          <input id="quit-period" type="number" min="1" step="1" required value="{{QUIT_PERIOD}}" />
        </div>
      </div>
      <button id="calculate-smoking" class="calc" type="button">Calculate benefits</button>

      <div class="results">
        <div class="stat"><span class="label">Money saved</span><span id="money-saved" class="value">--</span></div>
        <div class="stat"><span class="label">Life gained</span><span id="life-increase" class="value">--</span></div>
        <div class="stat"><span class="label">Cancer risk</span><span id="cancer-risk" class="value">--</span></div>
        <div class="stat"><span class="label">Heart risk</span><span id="heart-risk" class="value">--</span></div>
      </div>

      <div class="progress">
        <div class="progress-track"><div id="quit-progress-bar"></div></div>
        <div class="progress-meta">
          <span id="progress-days">Days kept: 0</span>
          <span id="progress-percentage">0%</span>
        </div>
        <button id="reset-progress" type="button">Reset progress</button>
      </div>

      <div class="chart-container"><canvas id="risk-chart"></canvas></div>
    </section>

    <section id="exercise-tab" class="tab-content">
      <div class="fields">
        <div class="field">
          <label for="exercise-type">Exercise</label>
          <select id="exercise-type" data-selected="{{EXERCISE_TYPE}}">
            <option value="walking">Walking</option>
            <option value="jogging">Jogging</option>
            <option value="cycling">Cycling</option>
            <option value="swimming">Swimming</option>
            <option value="weight_training">Weight training</option>
            <option value="yoga">Yoga</option>
            <option value="jumping_rope">Jumping rope</option>
            <option value="basketball">Basketball</option>
            <option value="badminton">Badminton</option>
            <option value="elliptical">Elliptical</option>
          </select>
        </div>
        <div class="field">
          <label for="exercise-duration">Minutes per session</label>
          <input id="exercise-duration" type="number" min="0" step="1" required value="{{EXERCISE_DURATION}}" />
        </div>
        <div class="field">
          <label for="exercise-frequency">Sessions per week</label>
          <input id="exercise-frequency" type="number" min="0" step="1" required value="{{EXERCISE_FREQUENCY}}" />
        </div>
        <div class="field">
          <label for="user-weight">Weight (kg)</label>
          <input id="user-weight" type="number" min="0" step="1" required value="{{USER_WEIGHT}}" />
        </div>
      </div>
      <button id="calculate-exercise" class="calc" type="button">Calculate benefits</button>

      <div class="results">
        <div class="stat"><span class="label">Per session</span><span id="calories-burned" class="value">--</span></div>
        <div class="stat"><span class="label">Per week</span><span id="weekly-calories" class="value">--</span></div>
        <div class="stat"><span class="label">Cardio risk</span><span id="cardio-risk" class="value">--</span></div>
        <div class="stat"><span class="label">Mood improvement</span><span id="mood-improvement" class="value">--</span></div>
      </div>

      <div class="chart-container"><canvas id="exercise-chart"></canvas></div>
    </section>
  </main>

  <div id="notification"></div>

  <script>
    const $ = (id) => document.getElementById(id);
    const charts = {};
    let notifyTimer = null;

    const notify = (message) => {
      const el = $('notification');
      el.textContent = message;
      el.classList.add('show');
      clearTimeout(notifyTimer);
      notifyTimer = setTimeout(() => el.classList.remove('show'), 3000);
    };

    const api = async (method, url, body) => {
      const res = await fetch(url, {
        method,
        headers: body ? { 'content-type': 'application/json' } : {},
        body: body ? JSON.stringify(body) : undefined
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const habitForm = () => ({
      habitType: $('habit-type').value,
      cigarettesPerDay: $('cigarettes-per-day').value,
      cigarettePrice: $('cigarette-price').value,
      cigarettesPerPack: $('cigarettes-per-pack').value,
      drinksPerDay: $('drinks-per-day').value,
      drinkPrice: $('drink-price').value,
      quitPeriod: $('quit-period').value
    });

    const exerciseForm = () => ({
      exerciseType: $('exercise-type').value,
      exerciseDuration: $('exercise-duration').value,
      exerciseFrequency: $('exercise-frequency').value,
      userWeight: $('user-weight').value
    });

    const toggleHabitFields = () => {
      const smoking = $('habit-type').value === 'smoking';
      document.querySelectorAll('.smoking-specific').forEach((el) => (el.style.display = smoking ? 'grid' : 'none'));
      document.querySelectorAll('.drinking-specific').forEach((el) => (el.style.display = smoking ? 'none' : 'grid'));
    };

    const showFieldError = (field, message) => {
      let slot = $(`${field}-error`);
      if (!slot && message) {
        slot = document.createElement('div');
        slot.id = `${field}-error`;
        slot.className = 'error-message';
        $(field).parentElement.appendChild(slot);
      }
      if (slot) slot.textContent = message || '';
    };

    const validate = async (input) => {
      const out = await api('POST', '/api/validate', { field: input.id, value: input.value });
      if (out.error) input.value = out.value;
      showFieldError(out.field, out.error);
    };

    const renderChart = (canvasId, chart) => {
      const existing = charts[canvasId];
      if (existing) {
        existing.data.datasets[0].data = chart.values;
        existing.update();
        return;
      }
      const scale = { beginAtZero: true, max: chart.max };
      charts[canvasId] = new Chart($(canvasId).getContext('2d'), {
        type: chart.kind,
        data: {
          labels: chart.labels,
          datasets: [{
            label: chart.title,
            data: chart.values,
            backgroundColor: chart.kind === 'bar'
              ? ['rgba(255, 99, 132, 0.7)', 'rgba(54, 162, 235, 0.7)', 'rgba(255, 206, 86, 0.7)', 'rgba(75, 192, 192, 0.7)']
              : 'rgba(153, 102, 255, 0.2)',
            borderColor: chart.kind === 'bar' ? 'rgba(47, 72, 88, 0.6)' : 'rgba(153, 102, 255, 1)',
            borderWidth: 1
          }]
        },
        options: {
          responsive: true,
          maintainAspectRatio: false,
          scales: chart.kind === 'bar' ? { y: scale } : { r: { suggestedMin: 0, suggestedMax: chart.max } },
          plugins: { legend: { position: 'bottom', labels: { boxWidth: 12, font: { size: 11 } } } }
        }
      });
    };

    const renderProgress = (p) => {
      const bar = $('quit-progress-bar');
      bar.style.width = `${p.percentage}%`;
      bar.style.backgroundColor = p.color_hex;
      $('progress-days').textContent = `Days kept: ${p.elapsed_days}`;
      $('progress-percentage').textContent = `${p.percentage_display}%`;
    };

    const showErrors = (errors) => {
      Object.entries(errors).forEach(([field, message]) => showFieldError(field, message));
    };

    const calculateHabit = async () => {
      const out = await api('POST', '/api/habit/calculate', habitForm());
      showErrors(out.errors);
      $('money-saved').textContent = out.result.money_saved.toFixed(2);
      $('life-increase').textContent = `${out.result.life_increase_months.toFixed(1)} months`;
      $('cancer-risk').textContent = `${out.result.risk_reductions.cancer.toFixed(1)}%`;
      $('heart-risk').textContent = `${out.result.risk_reductions.heart.toFixed(1)}%`;
      renderProgress(out.progress);
      renderChart('risk-chart', await api('GET', '/api/charts/risk'));
      document.querySelector('#smoking-tab .chart-container').classList.add('visible');
    };

    const calculateExercise = async () => {
      const out = await api('POST', '/api/exercise/calculate', exerciseForm());
      showErrors(out.errors);
      $('calories-burned').textContent = `${out.result.calories_per_session} kcal`;
      $('weekly-calories').textContent = `${out.result.weekly_calories} kcal`;
      $('cardio-risk').textContent = `${out.result.cardio_risk_reduction.toFixed(1)}%`;
      $('mood-improvement').textContent = out.result.mood_improvement_display;
      renderChart('exercise-chart', await api('GET', '/api/charts/exercise'));
      document.querySelector('#exercise-tab .chart-container').classList.add('visible');
    };

    const save = async () => {
      const out = await api('PUT', '/api/forms', { habit: habitForm(), exercise: exerciseForm() });
      notify(out.message);
    };

    const fail = (err) => notify(err.message);

    document.querySelectorAll('.tab-btn').forEach((button) => {
      button.addEventListener('click', () => {
        document.querySelectorAll('.tab-btn').forEach((b) => b.classList.remove('active'));
        document.querySelectorAll('.tab-content').forEach((c) => c.classList.remove('active'));
        button.classList.add('active');
        $(`${button.dataset.tab}-tab`).classList.add('active');
      });
    });

    document.querySelectorAll('select[data-selected]').forEach((select) => {
      if (select.dataset.selected) select.value = select.dataset.selected;
    });
    toggleHabitFields();
    $('habit-type').addEventListener('change', toggleHabitFields);

    document.querySelectorAll('input, select').forEach((el) => {
      el.addEventListener('change', () => save().catch(fail));
      if (el.tagName === 'INPUT') {
        el.addEventListener('input', () => validate(el).catch(fail));
      }
    });

    $('calculate-smoking').addEventListener('click', () => calculateHabit().catch(fail));
    $('calculate-exercise').addEventListener('click', () => calculateExercise().catch(fail));

    $('reset-progress').addEventListener('click', () => {
      if (!confirm('Reset your quit progress?')) return;
      api('POST', '/api/progress/reset', { habitType: $('habit-type').value })
        .then((p) => {
          renderProgress(p);
          notify(`Progress reset, new goal: ${p.target_days} days`);
        })
        .catch(fail);
    });

    window.addEventListener('resize', () => Object.values(charts).forEach((c) => c.resize()));

    api('GET', '/api/charts')
      .then((registry) => {
        renderChart('risk-chart', registry.charts.risk);
        renderChart('exercise-chart', registry.charts.exercise);
      })
      .catch(fail);
    api('GET', `/api/progress?habit=${$('habit-type').value}`).then(renderProgress).catch(fail);
    api('GET', '/api/forms')
      .then((forms) => { if (forms.message) notify(forms.message); })
      .catch(fail);
  </script>
</body>
</html>
"#;
