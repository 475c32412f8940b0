use std::collections::HashMap;

/// Converts heading text into a GitHub-style slug.
///
/// Letters and digits of any script are lowercased and kept, `-` and `_` are
/// kept, whitespace becomes `-`, everything else is dropped.
///
/// ```
/// use xlog_core::slug::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("你好 世界"), "你好-世界");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.trim().chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if ch == '-' || ch == '_' {
            slug.push(ch);
        } else if ch.is_whitespace() {
            slug.push('-');
        }
    }
    slug
}

/// Hands out unique slugs for the headings of one document.
#[derive(Debug, Default)]
pub struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    /// Creates a new slugger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates the next slug for the given heading text.
    ///
    /// The first occurrence keeps the bare slug; later ones get `-1`, `-2`, ...
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let Some(&last) = self.seen.get(&base) else {
            self.seen.insert(base.clone(), 0);
            return base;
        };

        let mut counter = last;
        let slug = loop {
            counter += 1;
            let candidate = format!("{}-{}", base, counter);
            if !self.seen.contains_key(&candidate) {
                break candidate;
            }
        };
        self.seen.insert(base, counter);
        self.seen.insert(slug.clone(), 0);
        slug
    }
}
