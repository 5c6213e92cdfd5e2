//! Token extraction and annotation.

use wasmi::Val;

use clang_wasm_api::{TokenHandle, TokenKind};

use crate::cursor::Cursor;
use crate::error::HostError;
use crate::runtime::LibClang;
use crate::source_location::{SourceLocation, SourceRange};
use crate::translation_unit::TranslationUnit;

/// A single preprocessing token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    handle: TokenHandle,
}

impl Token {
    fn from_wire(handle: u32) -> Self {
        Self {
            handle: TokenHandle::from_raw(handle),
        }
    }

    pub fn handle(&self) -> TokenHandle {
        self.handle
    }

    pub(crate) fn arg(&self) -> Val {
        Val::I32(self.handle.as_raw() as i32)
    }
}

impl LibClang {
    /// The token at a source location (`clang_getToken`), `None` when
    /// the location does not point at one.
    pub fn token_at(
        &mut self,
        tu: &TranslationUnit,
        location: &SourceLocation,
    ) -> Result<Option<Token>, HostError> {
        let handle = self.call_u32("clang_getToken", &[tu.arg(), location.arg()])?;
        Ok((handle != 0).then(|| Token::from_wire(handle)))
    }

    /// Tokenizes the source covered by a range (`clang_tokenize`).
    pub fn tokenize(
        &mut self,
        tu: &TranslationUnit,
        range: &SourceRange,
    ) -> Result<Vec<Token>, HostError> {
        let handles = self.call_list("clang_tokenize", &[tu.arg(), range.arg()])?;
        Ok(handles.into_iter().map(Token::from_wire).collect())
    }

    /// Annotates tokens with the cursors they belong to
    /// (`clang_annotateTokens`). The result has one cursor per input
    /// token, in order.
    pub fn annotate_tokens(
        &mut self,
        tu: &TranslationUnit,
        tokens: &[Token],
    ) -> Result<Vec<Cursor>, HostError> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        // Token handles are written as a plain word array.
        let size = (tokens.len() * 4) as u32;
        let ptr = self.alloc(size)?;
        let mut bytes = Vec::with_capacity(tokens.len() * 4);
        for token in tokens {
            bytes.extend_from_slice(&token.handle.as_raw().to_le_bytes());
        }
        self.write_bytes(ptr, &bytes)?;
        let cursors = self.call_list(
            "clang_annotateTokens",
            &[
                tu.arg(),
                Val::I32(ptr as i32),
                Val::I32(tokens.len() as i32),
            ],
        );
        self.free(ptr, size)?;
        let mut out = Vec::new();
        for handle in cursors? {
            out.push(self.decode_cursor(handle)?);
        }
        Ok(out)
    }

    /// `clang_getTokenKind`.
    pub fn token_kind(&mut self, token: &Token) -> Result<TokenKind, HostError> {
        let raw = self.call_u32("clang_getTokenKind", &[token.arg()])?;
        TokenKind::from_raw(raw).ok_or(HostError::InvalidEnumValue {
            what: "token kind",
            value: raw as i64,
        })
    }

    /// `clang_getTokenSpelling`.
    pub fn token_spelling(
        &mut self,
        tu: &TranslationUnit,
        token: &Token,
    ) -> Result<String, HostError> {
        self.call_str("clang_getTokenSpelling", &[tu.arg(), token.arg()])
    }

    /// `clang_getTokenLocation`.
    pub fn token_location(
        &mut self,
        tu: &TranslationUnit,
        token: &Token,
    ) -> Result<SourceLocation, HostError> {
        let handle = self.call_u32("clang_getTokenLocation", &[tu.arg(), token.arg()])?;
        Ok(SourceLocation::from_wire(handle))
    }

    /// `clang_getTokenExtent`.
    pub fn token_extent(
        &mut self,
        tu: &TranslationUnit,
        token: &Token,
    ) -> Result<SourceRange, HostError> {
        let handle = self.call_u32("clang_getTokenExtent", &[tu.arg(), token.arg()])?;
        Ok(SourceRange::from_wire(handle))
    }
}
