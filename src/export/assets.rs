//! Static assets copied verbatim into every generated site.

/// Client-side search over `search-index.json`.
///
/// A record matches when every whitespace-separated query token occurs in
/// its lowercased `content`; an empty query shows nothing.
pub const SEARCH_JS: &str = r#"(function () {
  'use strict';

  const MAX_RESULTS = 30;

  async function loadIndex(url) {
    const response = await fetch(url);
    if (!response.ok) {
      throw new Error('failed to load search index: ' + response.status);
    }
    return response.json();
  }

  function tokens(query) {
    return query.toLowerCase().split(/\s+/).filter(Boolean);
  }

  function filterRecords(records, query) {
    const terms = tokens(query);
    if (terms.length === 0) {
      return [];
    }
    return records
      .filter((record) => {
        const haystack = record.content.toLowerCase();
        return terms.every((term) => haystack.includes(term));
      })
      .slice(0, MAX_RESULTS);
  }

  function renderResults(list, results) {
    list.replaceChildren();
    for (const result of results) {
      const item = document.createElement('li');
      const link = document.createElement('a');
      link.href = result.url;
      link.textContent = result.title;
      const excerpt = document.createElement('div');
      excerpt.className = 'excerpt';
      excerpt.textContent = result.excerpt;
      item.append(link, excerpt);
      list.append(item);
    }
  }

  async function setup() {
    const app = document.getElementById('search-app');
    if (!app) {
      return;
    }
    const input = app.querySelector('input[type="search"]');
    const list = app.querySelector('.search-results');
    const records = await loadIndex(app.dataset.indexUrl);
    let timer = null;
    input.addEventListener('input', () => {
      window.clearTimeout(timer);
      timer = window.setTimeout(() => renderResults(list, filterRecords(records, input.value)), 120);
    });
  }

  document.addEventListener('DOMContentLoaded', () => {
    setup().catch((error) => console.error(error));
  });
})();
"#;
