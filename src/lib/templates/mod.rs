use serde::Serialize;

use crate::{
    config::{DEFAULT_BOOK, SEARCH_LIMIT},
    index::SearchEntry,
    utils::escape_text,
};

/// Data handed to the client script: the flattened term list plus the two
/// constants the route and search logic depend on.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientData<'a> {
    pub default_book: &'a str,
    pub limit: usize,
    pub terms: &'a [SearchEntry],
}

impl<'a> ClientData<'a> {
    pub fn new(terms: &'a [SearchEntry]) -> Self {
        Self {
            default_book: DEFAULT_BOOK,
            limit: SEARCH_LIMIT,
            terms,
        }
    }

    /// JSON safe to place inside a `<script>` element.
    pub fn to_script_json(&self) -> color_eyre::Result<String> {
        Ok(serde_json::to_string(self)?.replace("</", "<\\/"))
    }
}

/// The single page: header, every pre-rendered region, then the data and script.
pub fn page_shell(
    title: &str,
    head_common: &str,
    body_header: &str,
    regions: &str,
    footer: &str,
    data_json: &str,
) -> String {
    let title = escape_text(title);
    let script = app_script();
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="style.css">
{head_common}
</head>
<body>
{body_header}
<main id="app">
{regions}
</main>
{footer}
<script id="search-data" type="application/json">{data_json}</script>
<script>{script}</script>
</body>
</html>
"#
    )
}

/// Hash routing, region switching and the search panel on the client.
/// Route keys, ranking and cursor movement match `router` and `search`.
pub fn app_script() -> &'static str {
    r##"
(function () {
  var data = JSON.parse(document.getElementById('search-data').textContent);
  var regions = {};
  document.querySelectorAll('section[data-route]').forEach(function (s) {
    regions[s.getAttribute('data-route')] = s;
  });
  var crumbs = document.getElementById('breadcrumb');
  var box = document.getElementById('search');
  var input = document.getElementById('search-input');
  var panel = document.getElementById('search-results');
  var results = null, needle = '', cursor = -1, open = false;

  function decode(s) {
    try { return decodeURIComponent(s); } catch (e) { return s; }
  }

  function routeKey(hash) {
    var parts = hash.replace(/^#/, '').split('/').filter(Boolean);
    if (parts[0] === 'book') return 'book/' + decode(parts[1] || data.defaultBook);
    if (parts[0] === 'chapter' && parts[1]) return 'chapter/' + decode(parts[1]);
    if (parts[0] === 'term') return 'term/' + decode(parts.slice(1).join('/'));
    return '';
  }

  function show() {
    var key = routeKey(location.hash);
    var region = regions[key], bookId = null;
    if (!region && key.indexOf('book/') === 0) {
      region = regions['book/*'];
      bookId = key.slice(5);
    }
    if (!region) region = regions[''];
    Object.keys(regions).forEach(function (k) {
      regions[k].classList.toggle('active', regions[k] === region);
    });
    crumbs.innerHTML = region.querySelector('template.crumbs').innerHTML;
    if (bookId !== null) {
      region.querySelector('.book-id').textContent = bookId;
      crumbs.lastElementChild.textContent = 'Book ' + bookId;
    }
    close();
    window.scrollTo(0, 0);
  }

  function esc(s) {
    return s.replace(/[&<>"']/g, function (c) { return '&#' + c.charCodeAt(0) + ';'; });
  }

  function search(q) {
    needle = q.trim().toLowerCase();
    if (!needle) return null;
    var hits = [];
    data.terms.forEach(function (e) {
      var lower = e.term.toLowerCase(), at = lower.indexOf(needle);
      if (at >= 0) hits.push({ e: e, lower: lower, at: at, rank: at === 0 ? 0 : 1 });
    });
    hits.sort(function (a, b) {
      return a.rank - b.rank || (a.lower < b.lower ? -1 : a.lower > b.lower ? 1 : 0);
    });
    return hits.slice(0, data.limit);
  }

  function highlight(h) {
    var t = h.e.term;
    if (h.lower.length !== t.length) return esc(t);
    var end = h.at + needle.length;
    return esc(t.slice(0, h.at)) + '<mark>' + esc(t.slice(h.at, end)) + '</mark>' + esc(t.slice(end));
  }

  function render() {
    if (!open || results === null) { panel.innerHTML = ''; panel.classList.remove('open'); return; }
    panel.classList.add('open');
    if (!results.length) { panel.innerHTML = '<div class="search-empty">No matching terms</div>'; return; }
    panel.innerHTML = '<ul class="search-list">' + results.map(function (h, i) {
      return '<li class="search-result' + (i === cursor ? ' focused' : '') + '">' +
        '<a href="#/term/' + encodeURIComponent(h.e.slug) + '">' +
        '<span class="result-term">' + highlight(h) + '</span>' +
        '<span class="result-chapter">' + esc(h.e.chapter) + '</span></a></li>';
    }).join('') + '</ul>';
  }

  function close() { open = false; cursor = -1; render(); }

  function clear() { input.value = ''; results = null; close(); }

  function select(i) {
    var h = results && results[i];
    if (!h) return;
    clear();
    location.hash = '#/term/' + encodeURIComponent(h.e.slug);
  }

  input.addEventListener('input', function () {
    results = search(input.value);
    open = results !== null;
    cursor = -1;
    render();
  });

  input.addEventListener('keydown', function (ev) {
    if (!open) return;
    var len = results ? results.length : 0;
    if (ev.key === 'ArrowDown') { if (len) cursor = Math.min(cursor + 1, len - 1); }
    else if (ev.key === 'ArrowUp') { if (cursor >= 0) cursor = Math.max(cursor - 1, 0); }
    else if (ev.key === 'Enter') { if (cursor >= 0) select(cursor); return; }
    else if (ev.key === 'Escape') { close(); return; }
    else return;
    ev.preventDefault();
    render();
  });

  panel.addEventListener('click', function (ev) {
    var item = ev.target.closest('li.search-result');
    if (!item) return;
    ev.preventDefault();
    select(Array.prototype.indexOf.call(panel.querySelectorAll('li.search-result'), item));
  });

  document.addEventListener('click', function (ev) {
    if (!box.contains(ev.target)) close();
  });

  window.addEventListener('hashchange', show);
  show();
})();
"##
}

#[cfg(test)]
mod tests;
