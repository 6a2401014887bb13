use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Turns free text into a lower-case, hyphen-separated slug.
///
/// Input is decomposed into NFKD so accented letters lose their combining
/// marks (`"Cafés"` becomes `"cafes"`). Every run of characters that are not
/// alphanumeric collapses into a single `-`, and the result never starts or
/// ends with one. Text without any alphanumeric character yields an empty
/// string.
pub fn slugify(input: impl AsRef<str>) -> String {
    let mut slug = String::with_capacity(input.as_ref().len());
    let mut pending_separator = false;

    let decomposed = input
        .as_ref()
        .chars()
        .flat_map(char::to_lowercase)
        .nfkd()
        .filter(|c| !is_combining_mark(*c));

    for c in decomposed {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}
