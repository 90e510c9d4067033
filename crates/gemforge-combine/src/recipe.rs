//! Recipe strings
//!
//! A recipe is either a compact `<grade+1><code>` token for a pure chain (or
//! a bare code for a base gem), or a parenthesized `(left+right)` fusion of
//! two sub-recipes. Rendering always emits the canonical form; parsing
//! accepts any well-formed recipe and rebuilds the tree in a pool.

use std::iter::Peekable;
use std::str::CharIndices;

use gemforge_core::{GemError, GemId, LeafCode};

use crate::pool::GemPool;

/// Highest grade a compact token may ask for. Keeps chain costs well inside `u64`.
pub const MAX_RECIPE_GRADE: u32 = 48;

/// Deepest parenthesis nesting the parser accepts.
pub const MAX_RECIPE_DEPTH: usize = 256;

impl GemPool {
    /// Canonical recipe of a gem.
    pub fn recipe(&self, id: GemId) -> Result<String, GemError> {
        let mut out = String::new();
        self.write_recipe(id, &mut out)?;
        Ok(out)
    }

    fn write_recipe(&self, id: GemId, out: &mut String) -> Result<(), GemError> {
        // explicit stack: fusion trees can be far deeper than the call stack
        let mut pending = vec![Piece::Gem(id)];
        while let Some(piece) = pending.pop() {
            let id = match piece {
                Piece::Text(c) => {
                    out.push(c);
                    continue;
                }
                Piece::Gem(id) => id,
            };

            let gem = self.gem(id)?;
            if let Some(pure) = gem.pure_recipe() {
                out.push_str(&pure);
            } else if let Some((c1, c2)) = gem.components() {
                out.push('(');
                pending.push(Piece::Text(')'));
                pending.push(Piece::Gem(c2));
                pending.push(Piece::Text('+'));
                pending.push(Piece::Gem(c1));
            }
        }
        Ok(())
    }

    /// Build the gems described by `text` and return the id of the result.
    ///
    /// Every token gets its own base gem, so `(2y+y)` creates two yellow
    /// base gems. Whitespace between tokens is ignored. On error the pool
    /// is left exactly as it was.
    pub fn parse_recipe(&mut self, text: &str) -> Result<GemId, GemError> {
        let mark = self.len();
        let result = RecipeParser {
            pool: self,
            chars: text.char_indices().peekable(),
            len: text.len(),
            depth: 0,
        }
        .recipe();

        if result.is_err() {
            self.rollback(mark);
        }
        result
    }
}

enum Piece {
    Gem(GemId),
    Text(char),
}

fn malformed(position: usize, reason: impl Into<String>) -> GemError {
    GemError::MalformedRecipe {
        position,
        reason: reason.into(),
    }
}

struct RecipeParser<'a, 'p> {
    pool: &'p mut GemPool,
    chars: Peekable<CharIndices<'a>>,
    len: usize,
    /// Open parentheses around the current position
    depth: usize,
}

impl RecipeParser<'_, '_> {
    fn recipe(&mut self) -> Result<GemId, GemError> {
        let root = self.expr()?;
        self.skip_whitespace();
        if let Some((pos, c)) = self.chars.next() {
            return Err(malformed(pos, format!("unexpected '{c}' after recipe")));
        }
        Ok(root)
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn expect(&mut self, want: char) -> Result<(), GemError> {
        self.skip_whitespace();
        match self.chars.next() {
            Some((_, c)) if c == want => Ok(()),
            Some((pos, c)) => Err(malformed(pos, format!("expected '{want}', found '{c}'"))),
            None => Err(malformed(self.len, format!("expected '{want}', found end of recipe"))),
        }
    }

    fn expr(&mut self) -> Result<GemId, GemError> {
        self.skip_whitespace();
        match self.chars.peek().copied() {
            Some((pos, '(')) => {
                self.chars.next();
                if self.depth == MAX_RECIPE_DEPTH {
                    return Err(malformed(
                        pos,
                        format!("nesting deeper than {MAX_RECIPE_DEPTH} levels"),
                    ));
                }
                self.depth += 1;
                let left = self.expr()?;
                self.expect('+')?;
                let right = self.expr()?;
                self.expect(')')?;
                self.depth -= 1;
                self.pool.fuse(left, right)
            }
            Some((pos, c)) if c.is_ascii_digit() => self.pure_token(pos),
            Some((_, c)) if c.is_alphabetic() => {
                self.chars.next();
                let code = LeafCode::from_char(c)?;
                Ok(self.pool.add_leaf(code))
            }
            Some((pos, c)) => Err(malformed(pos, format!("unexpected '{c}'"))),
            None => Err(malformed(self.len, "unexpected end of recipe")),
        }
    }

    /// `<grade+1><code>`: a base gem fused with itself up to the given grade
    fn pure_token(&mut self, start: usize) -> Result<GemId, GemError> {
        let mut number: u32 = 0;
        while let Some((_, c)) = self.chars.next_if(|(_, c)| c.is_ascii_digit()) {
            let digit = c.to_digit(10).unwrap_or(0);
            number = number
                .checked_mul(10)
                .and_then(|n| n.checked_add(digit))
                .filter(|n| *n <= MAX_RECIPE_GRADE + 1)
                .ok_or_else(|| malformed(start, format!("grade above {}", MAX_RECIPE_GRADE + 1)))?;
        }

        let code = match self.chars.next() {
            Some((_, c)) => LeafCode::from_char(c)?,
            None => return Err(malformed(self.len, "grade without a gem code")),
        };

        let base_grade = (code.cost() - 1) as u32;
        if number == 0 || number - 1 < base_grade {
            return Err(malformed(
                start,
                format!("grade {number} is below the base grade of '{code}'"),
            ));
        }

        let leaf = self.pool.add_leaf(code);
        self.pool.upgrade(leaf, number - 1 - base_grade)
    }
}
