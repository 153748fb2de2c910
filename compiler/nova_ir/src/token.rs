//! Token types for the Nova lexer.
//!
//! A token pairs a category with a non-owning view of its lexeme and the
//! position where the lexeme started. The source buffer must outlive every
//! token derived from it; the `'src` lifetime enforces this.

use super::{SourcePosition, Span};
use std::fmt;

/// Token categories for Nova.
///
/// Literal kinds, identifiers, one grouped category each for builtin type
/// names and access modifiers, one variant per keyword, one variant per
/// operator/punctuation symbol, and the `Unknown`/`End` sentinels.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// String literal: `"hello"` (lexeme includes the quotes)
    Str,
    /// Decimal integer literal: `42`, `1_000`, `10u8`
    Int,
    /// Hexadecimal integer literal: `0xFF`
    HexInt,
    /// Binary integer literal: `0b1010`
    BinInt,
    /// Float literal: `3.14`, `.5`
    Float,

    /// Identifier
    Ident,
    /// Builtin type name: `i8`..`u64`, `f32`, `f64`, `bool`, `void`
    Type,
    /// Access modifier: `public`, `private`, `protected`
    Modifier,

    // Keywords
    Let,
    Mutable,
    Return,
    If,
    Else,
    While,
    For,
    In,
    Break,
    Continue,
    Switch,
    Struct,
    Enum,
    Union,
    Family,
    Entity,

    // Operators
    Eq,       // =
    EqEq,     // ==
    NotEq,    // !=
    Plus,     // +
    Minus,    // -
    Star,     // *
    Slash,    // /
    Percent,  // %
    AmpAmp,   // &&
    PipePipe, // ||
    Gt,       // >
    Lt,       // <
    GtEq,     // >=
    LtEq,     // <=
    Bang,     // !
    Arrow,    // ->
    PlusEq,   // +=
    MinusEq,  // -=
    StarEq,   // *=
    SlashEq,  // /=

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Comma,     // ,
    Colon,     // :
    Semicolon, // ;
    Dot,       // .
    Ellipsis,  // ...

    /// Unrecognized input; always paired with a lexical error.
    Unknown,
    /// End of input; always the last token of a completed scan.
    End,
}

impl TokenKind {
    /// Check if this kind is a reserved keyword (not a type or modifier).
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Let
                | TokenKind::Mutable
                | TokenKind::Return
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::For
                | TokenKind::In
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Switch
                | TokenKind::Struct
                | TokenKind::Enum
                | TokenKind::Union
                | TokenKind::Family
                | TokenKind::Entity
        )
    }

    /// Check if this kind is a literal.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Str
                | TokenKind::Int
                | TokenKind::HexInt
                | TokenKind::BinInt
                | TokenKind::Float
        )
    }

    /// Check if this kind is an operator symbol.
    pub fn is_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::EqEq
                | TokenKind::NotEq
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Percent
                | TokenKind::AmpAmp
                | TokenKind::PipePipe
                | TokenKind::Gt
                | TokenKind::Lt
                | TokenKind::GtEq
                | TokenKind::LtEq
                | TokenKind::Bang
                | TokenKind::Arrow
                | TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::StarEq
                | TokenKind::SlashEq
        )
    }

    /// Check if this kind is a punctuation/delimiter symbol.
    pub fn is_punctuation(self) -> bool {
        matches!(
            self,
            TokenKind::LParen
                | TokenKind::RParen
                | TokenKind::LBrace
                | TokenKind::RBrace
                | TokenKind::LBracket
                | TokenKind::RBracket
                | TokenKind::Comma
                | TokenKind::Colon
                | TokenKind::Semicolon
                | TokenKind::Dot
                | TokenKind::Ellipsis
        )
    }

    /// Short human-readable name for diagnostics and token dumps.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Str => "string",
            TokenKind::Int => "integer",
            TokenKind::HexInt => "hex integer",
            TokenKind::BinInt => "binary integer",
            TokenKind::Float => "float",
            TokenKind::Ident => "identifier",
            TokenKind::Type => "type name",
            TokenKind::Modifier => "access modifier",
            TokenKind::Let => "`let`",
            TokenKind::Mutable => "`mutable`",
            TokenKind::Return => "`return`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::While => "`while`",
            TokenKind::For => "`for`",
            TokenKind::In => "`in`",
            TokenKind::Break => "`break`",
            TokenKind::Continue => "`continue`",
            TokenKind::Switch => "`switch`",
            TokenKind::Struct => "`struct`",
            TokenKind::Enum => "`enum`",
            TokenKind::Union => "`union`",
            TokenKind::Family => "`family`",
            TokenKind::Entity => "`entity`",
            TokenKind::Eq => "`=`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::AmpAmp => "`&&`",
            TokenKind::PipePipe => "`||`",
            TokenKind::Gt => "`>`",
            TokenKind::Lt => "`<`",
            TokenKind::GtEq => "`>=`",
            TokenKind::LtEq => "`<=`",
            TokenKind::Bang => "`!`",
            TokenKind::Arrow => "`->`",
            TokenKind::PlusEq => "`+=`",
            TokenKind::MinusEq => "`-=`",
            TokenKind::StarEq => "`*=`",
            TokenKind::SlashEq => "`/=`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Dot => "`.`",
            TokenKind::Ellipsis => "`...`",
            TokenKind::Unknown => "unknown",
            TokenKind::End => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A classified token: category, lexeme view, byte span, and the
/// line/column position of the lexeme start.
///
/// Immutable once created. `text` points into the source buffer; the buffer
/// must outlive the token.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Span,
    pub pos: SourcePosition,
}

impl<'src> Token<'src> {
    #[inline]
    pub fn new(kind: TokenKind, text: &'src str, span: Span, pos: SourcePosition) -> Self {
        Token {
            kind,
            text,
            span,
            pos,
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?} @ {}", self.kind, self.text, self.pos)
    }
}

/// The scanner's output: a stable, randomly-indexable token sequence of
/// known length, ending in an [`End`](TokenKind::End) token.
///
/// A parser can be built against this independently; indices are stable
/// for the lifetime of the list.
#[derive(Clone, Default)]
pub struct TokenList<'src> {
    tokens: Vec<Token<'src>>,
}

impl<'src> TokenList<'src> {
    /// Create a new empty token list.
    #[inline]
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    /// Create a token list with pre-allocated capacity.
    ///
    /// The scanner sizes this from the source length (roughly one token
    /// per four bytes of typical source).
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
        }
    }

    /// Append a token.
    #[inline]
    pub fn push(&mut self, token: Token<'src>) {
        self.tokens.push(token);
    }

    /// Number of tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get a token by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token<'src>> {
        self.tokens.get(index)
    }

    /// The last token, if any. After a completed scan this is always
    /// the `End` token.
    #[inline]
    pub fn last(&self) -> Option<&Token<'src>> {
        self.tokens.last()
    }

    /// Iterate over the tokens in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Token<'src>> {
        self.tokens.iter()
    }

    /// View the tokens as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Token<'src>] {
        &self.tokens
    }

    /// Sequence of kinds, for compact assertions.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }
}

impl<'src> std::ops::Index<usize> for TokenList<'src> {
    type Output = Token<'src>;

    #[inline]
    fn index(&self, index: usize) -> &Token<'src> {
        &self.tokens[index]
    }
}

impl<'src, 'a> IntoIterator for &'a TokenList<'src> {
    type Item = &'a Token<'src>;
    type IntoIter = std::slice::Iter<'a, Token<'src>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl fmt::Debug for TokenList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy(kind: TokenKind, text: &str) -> Token<'_> {
        Token::new(kind, text, Span::DUMMY, SourcePosition::START)
    }

    #[test]
    fn kind_predicates_are_disjoint() {
        let all = [
            TokenKind::Str,
            TokenKind::Int,
            TokenKind::Ident,
            TokenKind::Type,
            TokenKind::Modifier,
            TokenKind::Let,
            TokenKind::EqEq,
            TokenKind::Semicolon,
            TokenKind::Unknown,
            TokenKind::End,
        ];
        for kind in all {
            let classes = [
                kind.is_keyword(),
                kind.is_literal(),
                kind.is_operator(),
                kind.is_punctuation(),
            ];
            assert!(
                classes.iter().filter(|&&c| c).count() <= 1,
                "{kind:?} belongs to more than one class"
            );
        }
    }

    #[test]
    fn keywords_are_keywords() {
        assert!(TokenKind::Let.is_keyword());
        assert!(TokenKind::Entity.is_keyword());
        assert!(!TokenKind::Type.is_keyword());
        assert!(!TokenKind::Modifier.is_keyword());
        assert!(!TokenKind::Ident.is_keyword());
    }

    #[test]
    fn describe_covers_symbols() {
        assert_eq!(TokenKind::Arrow.describe(), "`->`");
        assert_eq!(TokenKind::Ellipsis.describe(), "`...`");
        assert_eq!(format!("{}", TokenKind::Ident), "identifier");
    }

    #[test]
    fn token_list_random_access() {
        let mut list = TokenList::new();
        list.push(dummy(TokenKind::Let, "let"));
        list.push(dummy(TokenKind::Ident, "x"));
        list.push(dummy(TokenKind::End, ""));

        assert_eq!(list.len(), 3);
        assert_eq!(list[1].text, "x");
        assert_eq!(list.get(2).map(|t| t.kind), Some(TokenKind::End));
        assert!(list.get(3).is_none());
        assert_eq!(list.last().map(|t| t.kind), Some(TokenKind::End));
    }

    #[test]
    fn token_list_kinds_sequence() {
        let mut list = TokenList::new();
        list.push(dummy(TokenKind::Int, "1"));
        list.push(dummy(TokenKind::Plus, "+"));
        list.push(dummy(TokenKind::Int, "2"));
        assert_eq!(
            list.kinds(),
            vec![TokenKind::Int, TokenKind::Plus, TokenKind::Int]
        );
    }

    #[test]
    fn token_is_immutable_snapshot() {
        let src = String::from("let");
        let tok = Token::new(
            TokenKind::Let,
            &src,
            Span::new(0, 3),
            SourcePosition::new(1, 1),
        );
        // a copy keeps the same view and location
        let copy = tok;
        assert_eq!(copy, tok);
        assert_eq!(copy.text, "let");
        assert_eq!(copy.pos, SourcePosition::new(1, 1));
    }
}
