//! Perfect-hash classification of reserved lexemes.
//!
//! An immutable mapping from the fixed list of reserved words, builtin type
//! names, access modifiers, operators, and punctuation to their token
//! categories. Lookup is a hash, one table read, and one exact string
//! compare - no chained comparisons against the keyword list.
//!
//! # Construction (CHD-style, two-level)
//!
//! 1. Every entry is assigned to one of [`BUCKET_COUNT`] buckets by a
//!    primary hash of its text.
//! 2. A bucket holding a single entry places it directly at
//!    `hash % TABLE_SIZE`.
//! 3. A bucket holding several entries searches seeds `0..=255` for one
//!    where `mix64(hash ^ seed) % TABLE_SIZE` lands every member in a
//!    distinct free slot; the winning seed is stored per bucket.
//!
//! The whole table is built in const context into [`CLASSIFIER`], so a
//! slot conflict or an exhausted seed search is a *compile* error - a
//! toolchain configuration defect, never a runtime condition.

use nova_ir::TokenKind;

/// Number of first-level buckets. Comfortable for the ~60-entry table.
const BUCKET_COUNT: usize = 64;

/// Number of second-level slots; must be >= the entry count.
const TABLE_SIZE: usize = 128;

/// Upper bound on entries per bucket, validated during construction.
const MAX_BUCKET: usize = 8;

/// The fixed reserved list: every lexeme the classifier resolves to
/// something other than `Ident`.
pub(crate) const ENTRIES: [(&str, TokenKind); 62] = [
    // builtin type names
    ("i8", TokenKind::Type),
    ("i16", TokenKind::Type),
    ("i32", TokenKind::Type),
    ("i64", TokenKind::Type),
    ("u8", TokenKind::Type),
    ("u16", TokenKind::Type),
    ("u32", TokenKind::Type),
    ("u64", TokenKind::Type),
    ("f32", TokenKind::Type),
    ("f64", TokenKind::Type),
    ("bool", TokenKind::Type),
    ("void", TokenKind::Type),
    // keywords
    ("let", TokenKind::Let),
    ("mutable", TokenKind::Mutable),
    ("return", TokenKind::Return),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("while", TokenKind::While),
    ("for", TokenKind::For),
    ("in", TokenKind::In),
    ("break", TokenKind::Break),
    ("continue", TokenKind::Continue),
    ("switch", TokenKind::Switch),
    ("struct", TokenKind::Struct),
    ("enum", TokenKind::Enum),
    ("union", TokenKind::Union),
    ("family", TokenKind::Family),
    ("entity", TokenKind::Entity),
    // access modifiers
    ("public", TokenKind::Modifier),
    ("private", TokenKind::Modifier),
    ("protected", TokenKind::Modifier),
    // two-character operators
    ("&&", TokenKind::AmpAmp),
    ("||", TokenKind::PipePipe),
    ("==", TokenKind::EqEq),
    ("!=", TokenKind::NotEq),
    (">=", TokenKind::GtEq),
    ("<=", TokenKind::LtEq),
    ("->", TokenKind::Arrow),
    ("+=", TokenKind::PlusEq),
    ("-=", TokenKind::MinusEq),
    ("*=", TokenKind::StarEq),
    ("/=", TokenKind::SlashEq),
    // one-character operators
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("=", TokenKind::Eq),
    (">", TokenKind::Gt),
    ("<", TokenKind::Lt),
    ("!", TokenKind::Bang),
    ("%", TokenKind::Percent),
    // punctuation
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    ("{", TokenKind::LBrace),
    ("}", TokenKind::RBrace),
    ("[", TokenKind::LBracket),
    ("]", TokenKind::RBracket),
    (",", TokenKind::Comma),
    (";", TokenKind::Semicolon),
    (":", TokenKind::Colon),
    (".", TokenKind::Dot),
    ("...", TokenKind::Ellipsis),
];

/// Murmur3 64-bit finalizer: avalanches the FNV hash so bucket and slot
/// derivation see well-mixed bits.
const fn mix64(mut x: u64) -> u64 {
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51_afd7_ed55_8ccd);
    x ^= x >> 33;
    x = x.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    x ^= x >> 33;
    x
}

/// FNV-1a over the lexeme bytes, finalized with [`mix64`].
const fn hash64(bytes: &[u8]) -> u64 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    let mut i = 0;
    while i < bytes.len() {
        h ^= bytes[i] as u64;
        h = h.wrapping_mul(0x0000_0100_0000_01b3);
        i += 1;
    }
    mix64(h)
}

/// The immutable two-level table. Built once; shared read-only by every
/// scan (see [`CLASSIFIER`]).
pub struct ClassifierTable {
    /// Slot -> index into [`ENTRIES`], or -1 for an empty slot.
    slots: [i16; TABLE_SIZE],
    /// Per-bucket seed; meaningful only where `multi` is set.
    seeds: [u8; BUCKET_COUNT],
    /// Whether the bucket holds more than one entry (seeded re-hash on
    /// lookup) or at most one (direct primary slot).
    multi: [bool; BUCKET_COUNT],
}

impl ClassifierTable {
    /// Build the table from [`ENTRIES`].
    ///
    /// Runs entirely in const context. Any failure - a bucket over
    /// [`MAX_BUCKET`], a slot conflict between single-entry buckets, or an
    /// exhausted seed search - panics during const evaluation and fails
    /// the build.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "bucket and slot indices are reduced mod small table dimensions"
    )]
    const fn build() -> Self {
        let mut slots = [-1i16; TABLE_SIZE];
        let mut seeds = [0u8; BUCKET_COUNT];
        let mut multi = [false; BUCKET_COUNT];

        // Group entry indices by primary bucket.
        let mut counts = [0usize; BUCKET_COUNT];
        let mut members = [[0usize; MAX_BUCKET]; BUCKET_COUNT];
        let mut i = 0;
        while i < ENTRIES.len() {
            let bucket = (hash64(ENTRIES[i].0.as_bytes()) % BUCKET_COUNT as u64) as usize;
            if counts[bucket] == MAX_BUCKET {
                panic!("classifier bucket overflow: too many entries share a bucket");
            }
            members[bucket][counts[bucket]] = i;
            counts[bucket] += 1;
            i += 1;
        }

        // Single-entry buckets claim their primary-hash slot directly.
        let mut bucket = 0;
        while bucket < BUCKET_COUNT {
            if counts[bucket] == 1 {
                let entry = members[bucket][0];
                let slot = (hash64(ENTRIES[entry].0.as_bytes()) % TABLE_SIZE as u64) as usize;
                if slots[slot] != -1 {
                    panic!("classifier slot conflict between single-entry buckets");
                }
                slots[slot] = entry as i16;
            }
            bucket += 1;
        }

        // Multi-entry buckets search for a seed that spreads their members
        // over distinct free slots.
        let mut bucket = 0;
        while bucket < BUCKET_COUNT {
            if counts[bucket] > 1 {
                multi[bucket] = true;
                let mut seed: u32 = 0;
                let mut placed = false;
                while seed < 256 && !placed {
                    let mut chosen = [0usize; MAX_BUCKET];
                    let mut ok = true;
                    let mut k = 0;
                    while k < counts[bucket] {
                        let entry = members[bucket][k];
                        let h = hash64(ENTRIES[entry].0.as_bytes());
                        let slot = (mix64(h ^ seed as u64) % TABLE_SIZE as u64) as usize;
                        if slots[slot] != -1 {
                            ok = false;
                            break;
                        }
                        let mut j = 0;
                        while j < k {
                            if chosen[j] == slot {
                                ok = false;
                                break;
                            }
                            j += 1;
                        }
                        if !ok {
                            break;
                        }
                        chosen[k] = slot;
                        k += 1;
                    }
                    if ok {
                        let mut k = 0;
                        while k < counts[bucket] {
                            slots[chosen[k]] = members[bucket][k] as i16;
                            k += 1;
                        }
                        seeds[bucket] = seed as u8;
                        placed = true;
                    }
                    seed += 1;
                }
                if !placed {
                    panic!("classifier seed search exhausted; adjust table dimensions");
                }
            }
            bucket += 1;
        }

        ClassifierTable {
            slots,
            seeds,
            multi,
        }
    }

    /// Resolve raw lexeme bytes to a token category.
    ///
    /// Empty input and anything not on the reserved list resolve to
    /// [`TokenKind::Ident`]. The stored text is compared exactly, so hash
    /// collisions with non-reserved lexemes cannot misclassify.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "bucket and slot indices are reduced mod small table dimensions"
    )]
    pub fn lookup_bytes(&self, bytes: &[u8]) -> TokenKind {
        if bytes.is_empty() {
            return TokenKind::Ident;
        }

        let h = hash64(bytes);
        let bucket = (h % BUCKET_COUNT as u64) as usize;
        let slot = if self.multi[bucket] {
            (mix64(h ^ self.seeds[bucket] as u64) % TABLE_SIZE as u64) as usize
        } else {
            (h % TABLE_SIZE as u64) as usize
        };

        let Ok(entry) = usize::try_from(self.slots[slot]) else {
            return TokenKind::Ident;
        };
        let (text, kind) = ENTRIES[entry];
        if text.as_bytes() == bytes {
            kind
        } else {
            TokenKind::Ident
        }
    }

    /// Resolve a lexeme to a token category. See [`lookup_bytes`].
    ///
    /// [`lookup_bytes`]: Self::lookup_bytes
    #[inline]
    pub fn lookup(&self, text: &str) -> TokenKind {
        self.lookup_bytes(text.as_bytes())
    }
}

/// The process-wide classifier: built during const evaluation, never
/// mutated, safe to share across concurrent scans without locking.
pub static CLASSIFIER: ClassifierTable = ClassifierTable::build();

/// Resolve a lexeme against the process-wide table.
#[inline]
pub fn classify(text: &str) -> TokenKind {
    CLASSIFIER.lookup(text)
}

/// Resolve raw lexeme bytes against the process-wide table.
#[inline]
pub fn classify_bytes(bytes: &[u8]) -> TokenKind {
    CLASSIFIER.lookup_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_entry_resolves_to_its_category() {
        // All entries simultaneously: none shadowed by another's placement.
        for (text, kind) in ENTRIES {
            assert_eq!(classify(text), kind, "entry {text:?} shadowed");
        }
    }

    #[test]
    fn non_reserved_lexemes_are_identifiers() {
        for text in [
            "x", "foo", "lets", "letx", "xlet", "Let", "LET", "If", "i128", "u9", "f1", "_",
            "main", "whilee", "mutabl", "publics", "voids", "my_var", "e", "ii",
        ] {
            assert_eq!(classify(text), TokenKind::Ident, "{text:?}");
        }
    }

    #[test]
    fn empty_text_is_identifier() {
        assert_eq!(classify(""), TokenKind::Ident);
    }

    #[test]
    fn lookup_is_pure() {
        for text in ["let", "==", "frobnicate", "..."] {
            assert_eq!(classify(text), classify(text));
        }
    }

    #[test]
    fn keywords_resolve_individually() {
        assert_eq!(classify("let"), TokenKind::Let);
        assert_eq!(classify("return"), TokenKind::Return);
        assert_eq!(classify("struct"), TokenKind::Struct);
        assert_eq!(classify("entity"), TokenKind::Entity);
        assert_eq!(classify("mutable"), TokenKind::Mutable);
    }

    #[test]
    fn type_names_share_one_category() {
        for text in ["i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64", "f32", "f64", "bool", "void"] {
            assert_eq!(classify(text), TokenKind::Type, "{text:?}");
        }
    }

    #[test]
    fn modifiers_share_one_category() {
        for text in ["public", "private", "protected"] {
            assert_eq!(classify(text), TokenKind::Modifier, "{text:?}");
        }
    }

    #[test]
    fn operators_resolve_to_their_symbols() {
        assert_eq!(classify("->"), TokenKind::Arrow);
        assert_eq!(classify("=="), TokenKind::EqEq);
        assert_eq!(classify("="), TokenKind::Eq);
        assert_eq!(classify("{"), TokenKind::LBrace);
        assert_eq!(classify("..."), TokenKind::Ellipsis);
        assert_eq!(classify("."), TokenKind::Dot);
    }

    #[test]
    fn near_misses_fail_the_exact_match_guard() {
        // prefixes/extensions of reserved symbols are not reserved
        for text in ["===", "!==", "....", "-->", "&", "|", "+-"] {
            assert_eq!(classify(text), TokenKind::Ident, "{text:?}");
        }
    }

    #[test]
    fn byte_lookup_matches_str_lookup() {
        for (text, _) in ENTRIES {
            assert_eq!(classify_bytes(text.as_bytes()), classify(text));
        }
        assert_eq!(classify_bytes(b"nonsense"), TokenKind::Ident);
        // invalid UTF-8 can never match an entry
        assert_eq!(classify_bytes(&[0xFF, 0xFE]), TokenKind::Ident);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn arbitrary_identifiers_not_on_the_list_classify_as_ident(
                text in "[A-Za-z_][A-Za-z0-9_]{0,12}"
            ) {
                let reserved = ENTRIES.iter().any(|(key, _)| *key == text);
                if !reserved {
                    prop_assert_eq!(classify(&text), TokenKind::Ident);
                }
            }

            #[test]
            fn lookup_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..32)) {
                let _ = classify_bytes(&bytes);
            }
        }
    }
}
