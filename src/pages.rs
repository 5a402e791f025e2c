use axum::{response::Html, routing::get, Router};
use axum_extra::extract::cookie::CookieJar;

use crate::{flash, state::AppState};

const INDEX: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Zero Hunger Recipes</title>
</head>
<body>
  <h1>Zero Hunger Recipes</h1>
  {{flash}}
  <form method="post" action="/signup">
    <input name="name" placeholder="Name">
    <input name="email" type="email" placeholder="Email">
    <input name="password" type="password" placeholder="Password">
    <button>Sign up</button>
  </form>
  <form method="post" action="/signin">
    <input name="email" type="email" placeholder="Email">
    <input name="password" type="password" placeholder="Password">
    <button>Sign in</button>
  </form>
  <form method="post" action="/signout"><button>Sign out</button></form>

  <input id="ingredients" placeholder="Ingredients">
  <input id="servings" placeholder="Servings">
  <input id="prepTime" placeholder="Prep time (minutes)">
  <input id="region" placeholder="Region">
  <button onclick="getRecipe()">Get recipe</button>
  <button onclick="makePayment()">Donate (test mode)</button>
  <p id="output"></p>

  <script>
    async function getRecipe() {
      const body = {};
      for (const id of ["ingredients", "servings", "prepTime", "region"]) {
        const value = document.getElementById(id).value;
        if (value) body[id] = value;
      }
      const res = await fetch("/get_recipe", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify(body)
      });
      const data = await res.json();
      document.getElementById("output").innerText = data.recipe || data.error;
    }
    async function makePayment() {
      const res = await fetch("/pay", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify({ amount: 5.0 })
      });
      const data = await res.json();
      alert(data.message + " | Txn ID: " + data.txn_id);
    }
  </script>
</body>
</html>
"#;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(|| async { "ok" }))
}

pub async fn index(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, message) = flash::take(jar);
    let banner = message
        .map(|m| format!(r#"<p class="flash">{}</p>"#, escape_html(&m)))
        .unwrap_or_default();
    (jar, Html(INDEX.replace("{{flash}}", &banner)))
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
