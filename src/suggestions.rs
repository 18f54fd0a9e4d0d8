//! # Error Suggestions
//!
//! Helpers producing hints for common mistakes: a build file that cannot be
//! found, a misspelled target name on the command line, or a misspelled field
//! inside a target declaration (which would otherwise silently become a
//! subtarget).

use std::path::Path;

use crate::resolver::RECOGNIZED_FIELDS;

/// Generate an error for when the build file is not found.
pub fn build_file_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Build file not found: {path}\n\n\
         hint: Create a build.yaml file in your project root\n\
         hint: Use -f/--build-file to specify a different path\n\
         hint: Set the PANBUILD_FILE environment variable",
        path = path.display()
    )
}

/// Returns the recognized field a declaration key was probably meant to be.
///
/// Exact matches return `None`: they are not mistakes.
pub fn similar_field(key: &str) -> Option<&'static str> {
    if RECOGNIZED_FIELDS.contains(&key) {
        return None;
    }
    find_similar(key, RECOGNIZED_FIELDS)
}

/// Returns the candidate closest to `name`, if any is close enough.
pub fn closest_name<'a, I>(name: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let candidates: Vec<&str> = candidates.into_iter().collect();
    find_similar(name, &candidates).map(str::to_string)
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.chars().count() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Levenshtein distance between two strings, on chars.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
