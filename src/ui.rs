use crate::state::Session;

pub fn render_index(session: &Session) -> String {
    INDEX_HTML
        .replace("{{STREAK}}", &session.streak.value().to_string())
        .replace("{{SUMMARY}}", &escape_html(&session.summary))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Pull-up Log</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --muted: #8b857d;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(640px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1, h2 {
      margin: 0;
    }

    .summary {
      position: relative;
      background: white;
      border-radius: 18px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .summary pre {
      margin: 0;
      max-height: 10rem;
      overflow: auto;
      font-size: 1rem;
    }

    .summary .copy {
      position: absolute;
      top: 10px;
      right: 10px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
    }

    button:disabled {
      background: #d6d1ca;
      cursor: default;
    }

    button.primary {
      background: var(--accent);
    }

    .row {
      display: flex;
      gap: 10px;
      align-items: center;
      flex-wrap: wrap;
    }

    .streak {
      font-size: 2rem;
      font-weight: 600;
      color: var(--accent);
    }

    .set {
      background: white;
      border-radius: 18px;
      padding: 14px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 10px;
    }

    .set.unchecked {
      opacity: 0.55;
    }

    .set header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .set input[type="number"] {
      width: 5rem;
      padding: 6px;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }
  </style>
</head>
<body>
  <main class="app">
    <section>
      <h1>Copy String</h1>
      <div class="summary">
        <pre id="summary">{{SUMMARY}}</pre>
        <button class="copy primary" id="copy-btn" type="button">Copy</button>
      </div>
    </section>

    <section>
      <h1>Streak</h1>
      <div class="row">
        <span class="streak" id="streak">{{STREAK}}</span>
        <button type="button" id="streak-inc">Increment</button>
        <button type="button" id="streak-reset">Reset</button>
      </div>
    </section>

    <section>
      <h1>Sets</h1>
      <div id="sets"></div>
      <button class="primary" type="button" id="add-set">+ Add Set</button>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const summaryEl = document.getElementById('summary');
    const streakEl = document.getElementById('streak');
    const setsEl = document.getElementById('sets');
    const statusEl = document.getElementById('status');

    let current = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const button = (label, onClick, disabled) => {
      const el = document.createElement('button');
      el.type = 'button';
      el.textContent = label;
      el.disabled = Boolean(disabled);
      el.addEventListener('click', onClick);
      return el;
    };

    const renderSet = (set, index, total) => {
      const card = document.createElement('div');
      card.className = set.checked ? 'set' : 'set unchecked';

      const header = document.createElement('header');
      const title = document.createElement('div');
      title.className = 'row';
      const heading = document.createElement('h2');
      heading.textContent = `Set ${index + 1}`;
      title.append(
        heading,
        button('▲', () => send('POST', `/api/sets/${index}/up`), index === 0),
        button('▼', () => send('POST', `/api/sets/${index}/down`), index === total - 1)
      );
      const actions = document.createElement('div');
      actions.className = 'row';
      actions.append(
        button('❌', () => send('DELETE', `/api/sets/${index}`)),
        button(set.checked ? '✓' : ' ', () => send('POST', `/api/sets/${index}/toggle`))
      );
      header.append(title, actions);

      const kind = document.createElement('select');
      [['banded', 'Banded'], ['no-band', 'No band']].forEach(([value, label]) => {
        const option = document.createElement('option');
        option.value = value;
        option.textContent = label;
        option.selected = set.kind === value;
        kind.append(option);
      });
      kind.addEventListener('change', () =>
        send('POST', `/api/sets/${index}/kind`, { kind: kind.value })
      );

      const repsRow = document.createElement('label');
      repsRow.className = 'row';
      repsRow.textContent = 'Reps:';
      const reps = document.createElement('input');
      reps.type = 'number';
      reps.min = '0';
      reps.value = set.reps;
      reps.addEventListener('change', () =>
        send('POST', `/api/sets/${index}/reps`, { reps: reps.value })
      );
      repsRow.append(reps);

      card.append(header, kind, repsRow);
      return card;
    };

    const render = (data) => {
      current = data;
      summaryEl.textContent = data.summary;
      streakEl.textContent = data.streak;
      setsEl.replaceChildren(
        ...data.sets.map((set, index) => renderSet(set, index, data.sets.length))
      );
    };

    const send = async (method, url, body) => {
      const options = { method };
      if (body !== undefined) {
        options.headers = { 'content-type': 'application/json' };
        options.body = JSON.stringify(body);
      }
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        setStatus(msg || 'Request failed', 'error');
        return;
      }
      render(await res.json());
      setStatus('', '');
    };

    const load = async () => {
      const res = await fetch('/api/state');
      if (!res.ok) {
        throw new Error('Unable to load state');
      }
      render(await res.json());
    };

    document.getElementById('copy-btn').addEventListener('click', async () => {
      try {
        await navigator.clipboard.writeText(current ? current.summary : summaryEl.textContent);
        alert('Copied to clipboard!');
      } catch (err) {
        setStatus('Clipboard unavailable', 'error');
      }
    });
    document.getElementById('streak-inc').addEventListener('click', () =>
      send('POST', '/api/streak/increment')
    );
    document.getElementById('streak-reset').addEventListener('click', () =>
      send('POST', '/api/streak/reset')
    );
    document.getElementById('add-set').addEventListener('click', () =>
      send('POST', '/api/sets')
    );

    load().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_embeds_streak_and_escaped_summary() {
        let mut session = Session::default();
        session.streak.increment();
        session.summary = "1/2\n<b> Streak: 1\n".to_string();

        let html = render_index(&session);
        assert!(html.contains(r#"<span class="streak" id="streak">1</span>"#));
        assert!(html.contains("&lt;b&gt; Streak: 1"));
        assert!(!html.contains("{{"));
    }
}
