//! URL → display-domain extraction for the web-activity summaries.

/// Extract the domain portion of `url`.
///
/// The scheme is everything up to the first `"//"`; the domain is the
/// remainder up to the first `/`. A value without `"//"` is treated as
/// having no scheme, so the whole value up to the first `/` is the domain —
/// never an error.
pub fn domain_of(url: &str) -> &str {
  let rest = match url.split_once("//") {
    Some((_, rest)) => rest,
    None => url,
  };
  match rest.split_once('/') {
    Some((domain, _)) => domain,
    None => rest,
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
