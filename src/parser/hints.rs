use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{multispace0, multispace1},
    combinator::{eof, map, peek, recognize},
    IResult,
};
use serde::{Deserialize, Serialize};

/// Caching scope requested by a leading `CACHE GLOBAL` / `CACHE SESSION`
/// directive. `None` means no directive and no caching at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CacheMode {
    #[default]
    None,
    Global,
    Session,
}

fn cache_scope(input: &str) -> IResult<&str, CacheMode> {
    alt((
        map(tag_no_case("GLOBAL"), |_| CacheMode::Global),
        map(tag_no_case("SESSION"), |_| CacheMode::Session),
    ))(input)
}

// `CACHE <scope>` anchored at the start, case-insensitive. The scope word
// must end at a token boundary: `CACHE GLOBALIZE ...` is query text, not a
// directive.
fn cache_directive(input: &str) -> IResult<&str, CacheMode> {
    let (rest, _) = multispace0(input)?;
    let (rest, _) = tag_no_case("CACHE")(rest)?;
    let (rest, _) = multispace1(rest)?;
    let (rest, mode) = cache_scope(rest)?;
    let (rest, _) = peek(alt((recognize(multispace1), eof)))(rest)?;
    let (rest, _) = multispace0(rest)?;
    Ok((rest, mode))
}

/// Splits an optional leading cache directive off `query`.
///
/// On a match the directive and the whitespace separating it from the rest of
/// the query are consumed; the remainder is returned verbatim so placeholder
/// positions are untouched. Without a directive the query comes back
/// unchanged with [`CacheMode::None`].
#[must_use]
pub fn split_cache_directive(query: &str) -> (CacheMode, &str) {
    match cache_directive(query) {
        Ok((rest, mode)) => (mode, rest),
        Err(_) => (CacheMode::None, query),
    }
}

// Kept for symmetry with `split_cache_directive` when only the mode matters.
#[must_use]
pub fn cache_mode_of(query: &str) -> CacheMode {
    split_cache_directive(query).0
}
