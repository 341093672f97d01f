use once_cell::sync::Lazy;
use rand::Rng;

// The non-Latin filler is a visual signature only; the filter below
// discards it, leaving the constant alphabetic stem.
const SEED_PHRASE: &str = "素TERRI晴DEV晴素TERRI晴DEV晴";
const SUFFIX_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
pub const SUFFIX_LEN: usize = 2;

static STEM: Lazy<String> = Lazy::new(|| {
    SEED_PHRASE.chars().filter(char::is_ascii_alphabetic).collect()
});

/// Supplies symbol names to the transformation engine, one call per
/// renamed symbol.
pub trait IdentifierNamer: Send + Sync {
    fn next_identifier(&self) -> String;
}

/// Constant stem plus a short random suffix. Not globally unique by
/// contract; the engine disambiguates if it sees a repeat.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrandedNamer;

impl BrandedNamer {
    pub fn new() -> Self {
        BrandedNamer
    }

    pub fn stem() -> &'static str {
        &STEM
    }
}

impl IdentifierNamer for BrandedNamer {
    fn next_identifier(&self) -> String {
        let mut rng = rand::thread_rng();
        let mut name = String::with_capacity(STEM.len() + SUFFIX_LEN);
        name.push_str(&STEM);
        for _ in 0..SUFFIX_LEN {
            let idx = rng.gen_range(0..SUFFIX_ALPHABET.len());
            name.push(SUFFIX_ALPHABET[idx] as char);
        }
        name
    }
}
