/*!
asm - 6502 assembler pipeline.

Three explicit stages, each requiring the previous one:

```no_run
use famicore::asm::Assembler;

let mut asm = Assembler::new();
asm.lex("main: LDA #0x69\n BRK").unwrap();
asm.parse().unwrap();
asm.assemble().unwrap();
let bytes = asm.output();
```

`lex` resets the pipeline, so one `Assembler` can be reused across
sources; an error at any stage leaves it ready for a fresh `lex`.
The produced buffer loads at the program origin (0x0600 by default),
which is where label references on JMP/JSR are resolved against.

Submodules:
- span: positions and spans for diagnostics
- lexer: source text → tokens
- ast: tokens → nodes + label table + offsets
- emitter: nodes → bytes
*/

pub mod ast;
pub mod emitter;
pub mod lexer;
pub mod span;

use std::collections::HashMap;

use thiserror::Error;

use crate::cpu::PROGRAM_ORIGIN;
use ast::Program;
use emitter::EmitError;
use lexer::{LexError, Token};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ast::ParseError),
    #[error(transparent)]
    Emit(#[from] EmitError),
    #[error("parse() requires a prior lex()")]
    NotLexed,
    #[error("assemble() requires a prior parse()")]
    NotParsed,
}

pub struct Assembler {
    origin: u16,
    tokens: Option<Vec<Token>>,
    program: Option<Program>,
    output: Vec<u8>,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    /// Assembler targeting the standalone program origin (0x0600).
    pub fn new() -> Self {
        Self::with_origin(PROGRAM_ORIGIN)
    }

    /// Assembler targeting an explicit load address (0x8000 for
    /// cartridge images).
    pub fn with_origin(origin: u16) -> Self {
        Self {
            origin,
            tokens: None,
            program: None,
            output: Vec::new(),
        }
    }

    pub fn origin(&self) -> u16 {
        self.origin
    }

    /// Tokenize `source`, discarding any earlier pipeline state.
    pub fn lex(&mut self, source: &str) -> Result<(), AsmError> {
        self.program = None;
        self.output.clear();
        self.tokens = Some(lexer::lex(source)?);
        Ok(())
    }

    /// Build the AST from the lexed tokens.
    pub fn parse(&mut self) -> Result<(), AsmError> {
        let tokens = self.tokens.as_ref().ok_or(AsmError::NotLexed)?;
        self.program = Some(ast::parse(tokens)?);
        Ok(())
    }

    /// Emit machine code from the parsed program into the output
    /// buffer.
    pub fn assemble(&mut self) -> Result<(), AsmError> {
        let program = self.program.as_ref().ok_or(AsmError::NotParsed)?;
        self.output = emitter::emit(program, self.origin)?;
        Ok(())
    }

    /// The assembled bytes (empty until `assemble` succeeds).
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Label table of the parsed program, if any.
    pub fn labels(&self) -> Option<&HashMap<String, u16>> {
        self.program.as_ref().map(|p| &p.labels)
    }

    /// Convenience: run all three stages and borrow the result.
    pub fn assemble_source(&mut self, source: &str) -> Result<&[u8], AsmError> {
        self.lex(source)?;
        self.parse()?;
        self.assemble()?;
        Ok(&self.output)
    }
}
