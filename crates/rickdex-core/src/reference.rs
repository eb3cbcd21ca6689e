// ── Reference URL parsing ──
//
// A reference URL ends in `/{kind}/{id}` (optionally with a trailing
// slash), e.g. `https://rickandmortyapi.com/api/episode/28`. Parsing never
// fails loudly: a malformed URL yields an empty identifier and no kind.

use crate::model::EntityKind;

/// Path segments of a reference, with query/fragment and trailing slash
/// stripped.
fn segments(url: &str) -> impl Iterator<Item = &str> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    url[..end].trim_end_matches('/').rsplit('/')
}

/// Extract the trailing numeric identifier of a reference URL.
///
/// `.../episode/28` → `"28"`, `.../episode/28/` → `"28"`,
/// `.../episode/` → `""`.
pub fn extract_id(url: &str) -> &str {
    match segments(url).next() {
        Some(last) if !last.is_empty() && last.bytes().all(|b| b.is_ascii_digit()) => last,
        _ => "",
    }
}

/// Identifier as a positive integer, if the URL carries one.
pub fn parse_id(url: &str) -> Option<u32> {
    extract_id(url).parse().ok().filter(|id| *id > 0)
}

/// The entity kind a reference points at, taken from the nearest path
/// segment (scanning from the end) that names a catalog collection.
pub fn reference_kind(url: &str) -> Option<EntityKind> {
    segments(url).find_map(|segment| segment.parse().ok())
}
