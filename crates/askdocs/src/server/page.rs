//! The single-page front-end
//!
//! One text input, one Ask button, one output region. Pressing Enter
//! submits the form, so click and Enter run the identical code path.

use axum::response::Html;

/// GET / - serve the ask page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

const INDEX_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Askdocs</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 720px; margin: 3rem auto; padding: 0 1rem; color: #222; }
    h1 { font-size: 1.5rem; }
    form { display: flex; gap: 0.5rem; margin: 1.5rem 0; }
    input { flex: 1; padding: 0.5rem 0.75rem; font-size: 1rem; border: 1px solid #bbb; border-radius: 4px; }
    button { padding: 0.5rem 1.25rem; font-size: 1rem; border: none; border-radius: 4px; background: #1a73e8; color: #fff; cursor: pointer; }
    button:disabled { background: #9bb8e8; }
    #answer { white-space: pre-wrap; line-height: 1.5; border-top: 1px solid #eee; padding-top: 1rem; }
  </style>
</head>
<body>
  <h1>Askdocs</h1>
  <p>Ask questions grounded in your local documents.</p>
  <form id="ask-form">
    <input id="question" type="text" placeholder="e.g., What does my PDF say about topic X?" autocomplete="off" autofocus>
    <button id="ask-button" type="submit">Ask</button>
  </form>
  <div id="answer"></div>
  <script>
    const form = document.getElementById("ask-form");
    const question = document.getElementById("question");
    const button = document.getElementById("ask-button");
    const answer = document.getElementById("answer");

    form.addEventListener("submit", async (event) => {
      event.preventDefault();
      button.disabled = true;
      answer.textContent = "Thinking...";
      try {
        const response = await fetch("/api/ask", {
          method: "POST",
          headers: { "Content-Type": "application/json" },
          body: JSON.stringify({ question: question.value }),
        });
        const body = await response.json().catch(() => null);
        if (!response.ok) {
          answer.textContent =
            (body && body.error && body.error.message) ||
            "Request failed (" + response.status + ")";
          return;
        }
        answer.textContent = body.answer;
      } catch (err) {
        answer.textContent = "Request failed: " + err;
      } finally {
        button.disabled = false;
      }
    });
  </script>
</body>
</html>
"#;
