//! Inline stylesheet and script shared by every page.
//!
//! The script reads `window.SITE` (written by the layout) for the favicon
//! glyph and, on the home page only, the keymap. It then wires up:
//! the terminal overlay against `/api/terminal/*`, page shortcuts, the
//! copy-to-clipboard rows, the favicon fallback chain, the live clock and the
//! post back link.

/// Generic globe shown once every favicon candidate has failed.
pub(super) const GLOBE_GLYPH: &str = r#"<svg class="glyph" viewBox="0 0 24 24" width="16" height="16" fill="none" stroke="currentColor" stroke-width="2" aria-hidden="true"><circle cx="12" cy="12" r="10"/><path d="M2 12h20"/><path d="M12 2a15.3 15.3 0 0 1 4 10 15.3 15.3 0 0 1-4 10 15.3 15.3 0 0 1-4-10 15.3 15.3 0 0 1 4-10z"/></svg>"#;

pub(super) const STYLE: &str = r#"
*, *::before, *::after { box-sizing: border-box; }
body {
  margin: 0; font-family: system-ui, -apple-system, sans-serif;
  background: #fbfaf6; color: #1f1f1f; line-height: 1.5;
}
a { color: inherit; }
nav.site {
  display: flex; align-items: center; justify-content: space-between;
  border-bottom: 1px solid #e5e7eb; padding: 1rem 1.5rem;
}
nav.site .brand { font-size: 1.25rem; font-weight: 600; text-decoration: none; }
nav.site .links a { margin-left: 1.5rem; text-decoration: none; font-size: .95rem; }
nav.site .links a:hover, nav.site .brand:hover { color: #6366f1; }
main { max-width: 64rem; margin: 0 auto; padding: 1.5rem 2rem 8rem; }
main.narrow { max-width: 42rem; }
.intro { color: #52525b; margin-bottom: 1.5rem; }
.muted { color: #71717a; font-size: .875rem; font-style: italic; }
.mono { font-family: ui-monospace, SFMono-Regular, Menlo, monospace; }
.label { font-family: ui-monospace, monospace; font-size: .65rem; letter-spacing: .12em; text-transform: uppercase; color: #a1a1aa; margin-bottom: .75rem; }
.list-row { display: flex; justify-content: space-between; gap: 1rem; padding: .25rem 0; text-decoration: none; color: #52525b; }
.list-row strong { color: #1f1f1f; font-weight: 500; flex: none; }
.list-row:hover strong { color: #4f46e5; }
.list-row .tagline { margin: 0 2rem 0 auto; }
.reading-row .title { display: flex; gap: .5rem; align-items: flex-start; min-width: 0; }
.reading-row .meta { display: flex; gap: .75rem; flex: none; font-family: ui-monospace, monospace; font-size: .85rem; }
.favicon, .glyph { width: 16px; height: 16px; margin-top: .25rem; flex: none; border-radius: 50%; color: #9ca3af; }
.table-row { display: flex; align-items: center; gap: .75rem; padding: .6rem 0; text-decoration: none; border-bottom: 1px solid #f4f4f5; }
.table-row .title { font-size: .9rem; font-weight: 500; flex: none; }
.table-row .rule { flex: 1; border-top: 1px dashed #d4d4d8; }
.table-row .subtitle { font-size: .75rem; color: #71717a; flex: none; }
.table-row:hover .title { color: #4f46e5; }
kbd { font-family: ui-monospace, monospace; font-size: .6rem; border: 1px solid #d4d4d8; border-radius: 4px; padding: 1px 5px; background: #fafafa; color: #71717a; }
.hints { display: flex; flex-wrap: wrap; gap: .4rem 1rem; }
.hint { opacity: .4; transition: opacity .2s; font-size: .6rem; text-transform: uppercase; letter-spacing: .12em; }
.hint.active { opacity: 1; }
section { margin-bottom: 3rem; }
.post-header h1 { font-size: 2.25rem; margin: 0 0 .5rem; }
.post-body pre { background: #f4f4f5; padding: 1rem; overflow-x: auto; border-radius: 6px; }
.post-body code { background: #f4f4f5; padding: 0 .25rem; border-radius: 4px; font-size: .9em; }
.post-body blockquote { border-left: 4px solid #d4d4d8; margin-left: 0; padding-left: 1rem; font-style: italic; color: #52525b; }
.not-found { display: flex; height: 70vh; align-items: center; justify-content: center; font-size: 1.25rem; text-align: center; }
#terminal { position: fixed; inset: 0; background: rgba(0,0,0,.45); display: flex; align-items: center; justify-content: center; z-index: 40; }
#terminal[hidden] { display: none; }
.terminal-window { width: min(42rem, 92vw); height: min(26rem, 70vh); background: #111; color: #e4e4e7; border-radius: 10px; display: flex; flex-direction: column; font-family: ui-monospace, monospace; font-size: .85rem; overflow: hidden; }
.terminal-bar { display: flex; justify-content: space-between; padding: .4rem .75rem; background: #1c1c1c; color: #a1a1aa; }
.terminal-bar button { background: none; border: none; color: inherit; cursor: pointer; font: inherit; }
#terminal-log { flex: 1; overflow-y: auto; margin: 0; padding: .75rem; white-space: pre-wrap; }
#terminal-log .input { color: #a5b4fc; }
#terminal-form { display: flex; gap: .5rem; padding: .5rem .75rem; border-top: 1px solid #27272a; }
#terminal-input { flex: 1; background: transparent; border: none; color: inherit; font: inherit; outline: none; }
"#;

pub(super) const SCRIPT: &str = r#"
window.faviconFallback = function (img) {
  var rest = (img.dataset.fallbacks || "").split(" ").filter(Boolean);
  var next = rest.shift();
  if (next) {
    img.dataset.fallbacks = rest.join(" ");
    img.src = next;
  } else {
    img.outerHTML = (window.SITE && window.SITE.glyph) || "";
  }
};

document.addEventListener("DOMContentLoaded", function () {
  var site = window.SITE || {};
  var overlay = document.getElementById("terminal");
  var log = document.getElementById("terminal-log");
  var form = document.getElementById("terminal-form");
  var input = document.getElementById("terminal-input");
  var sessionId = null;

  function inTextField(target) {
    return target instanceof HTMLInputElement || target instanceof HTMLTextAreaElement;
  }

  function api(method, path, body) {
    var init = { method: method, headers: {} };
    if (body !== undefined) {
      init.headers["content-type"] = "application/json";
      init.body = JSON.stringify(body);
    }
    return fetch(path, init).then(function (res) {
      if (res.status === 204) return null;
      if (!res.ok) throw new Error("HTTP " + res.status);
      return res.json();
    });
  }

  function sessionPath(suffix) {
    return "/api/terminal/sessions/" + sessionId + (suffix || "");
  }

  function draw(snap) {
    log.textContent = "";
    snap.lines.forEach(function (line) {
      var div = document.createElement("div");
      div.className = line.kind;
      div.textContent = line.kind === "input" ? "$ " + line.text : line.text;
      log.appendChild(div);
    });
    log.scrollTop = log.scrollHeight;
    (snap.open || []).forEach(function (url) { window.open(url, "_blank"); });
    if (snap.closed) hide(false);
  }

  function isOpen() {
    return overlay && !overlay.hidden;
  }

  function show() {
    if (!overlay) return;
    overlay.hidden = false;
    input.value = "";
    input.focus();
    api("POST", "/api/terminal/sessions").then(function (snap) {
      sessionId = snap.id;
      draw(snap);
    }).catch(function () { sessionId = null; });
  }

  function hide(notify) {
    if (!overlay) return;
    overlay.hidden = true;
    if (notify && sessionId) api("DELETE", sessionPath()).catch(function () {});
    sessionId = null;
  }

  if (overlay) {
    overlay.addEventListener("click", function (e) {
      if (e.target === overlay) hide(true);
    });
    document.querySelectorAll("[data-terminal-close]").forEach(function (b) {
      b.addEventListener("click", function () { hide(true); });
    });
    form.addEventListener("submit", function (e) {
      e.preventDefault();
      if (!sessionId) return;
      var line = input.value;
      input.value = "";
      api("POST", sessionPath("/input"), { line: line }).then(draw).catch(function () { hide(false); });
    });
    input.addEventListener("keydown", function (e) {
      if (!sessionId) return;
      if (e.key === "ArrowUp" || e.key === "ArrowDown") {
        e.preventDefault();
        var direction = e.key === "ArrowUp" ? "previous" : "next";
        api("POST", sessionPath("/history"), { direction: direction }).then(function (r) {
          input.value = r.input;
        });
      } else if (e.key === "l" && e.ctrlKey) {
        e.preventDefault();
        api("POST", sessionPath("/clear")).then(draw);
      } else if (e.key === "Escape") {
        hide(true);
      }
    });
  }

  document.addEventListener("keydown", function (e) {
    if (!site.keys || inTextField(e.target)) return;
    var action = (isOpen() ? site.keys.open : site.keys.closed)[e.key];
    if (!action) return;
    if (action === "toggle") {
      e.preventDefault();
      isOpen() ? hide(true) : show();
      return;
    }
    var url = action;
    var hint = document.querySelector('[data-hint="' + e.key.toLowerCase() + '"]');
    if (hint) {
      hint.classList.add("active");
      setTimeout(function () { hint.classList.remove("active"); }, 1500);
    }
    window.open(url, "_blank");
  });

  document.querySelectorAll("[data-copy]").forEach(function (row) {
    row.addEventListener("click", function (e) {
      e.preventDefault();
      var label = row.querySelector(".subtitle");
      navigator.clipboard.writeText(row.dataset.copy).then(function () {
        if (!label) return;
        var before = label.textContent;
        label.textContent = "Copied!";
        setTimeout(function () { label.textContent = before; }, 2000);
      });
    });
  });

  var clock = document.getElementById("clock");
  if (clock) {
    var tick = function () {
      clock.textContent = new Date().toLocaleTimeString("en-IN", {
        timeZone: "Asia/Kolkata", hour: "2-digit", minute: "2-digit", hour12: true
      }) + " IST";
    };
    tick();
    setInterval(tick, 1000);
  }

  document.querySelectorAll("[data-back]").forEach(function (a) {
    a.addEventListener("click", function (e) {
      if (window.history.length > 1) {
        e.preventDefault();
        window.history.back();
      }
    });
  });
});
"#;
