use crate::arena::{NodeId, TokenArena};
use crate::delegate::Delegate;
use crate::error::ExprError;
use crate::lexer::{Lexeme, LexemeKind, Lexer, Op};
use crate::token::{BinaryOp, Token, UnaryOp};

/// Precedence-climbing recursive descent over the lexer's output. The only
/// state is the current lookahead lexeme; no backtracking, no re-reads.
///
/// The parser owns the arena while the tree is under construction and yields
/// it together with the root on success.
pub struct Parser<'s, 'd> {
    lexer: Lexer<'s, 'd>,
    delegate: &'d dyn Delegate,
    arena: TokenArena,
    look: Lexeme<'s>,
}

impl<'s, 'd> Parser<'s, 'd> {
    pub fn new(source: &'s str, delegate: &'d dyn Delegate, flags: u32) -> Result<Self, ExprError> {
        let mut lexer = Lexer::new(source, delegate, flags);
        let look = lexer.read_lexeme()?;
        Ok(Self {
            lexer,
            delegate,
            arena: TokenArena::new(),
            look,
        })
    }

    pub fn parse(mut self) -> Result<(TokenArena, NodeId), ExprError> {
        let root = self.binary(0)?;
        if self.look.kind != LexemeKind::End {
            return Err(ExprError::TrailingInput(self.look.pos));
        }
        Ok((self.arena, root))
    }

    /// Current lookahead. Intended for delegate hooks that consume further
    /// lexemes themselves.
    pub fn peek(&self) -> &Lexeme<'s> {
        &self.look
    }

    pub fn advance(&mut self) -> Result<(), ExprError> {
        self.look = self.lexer.read_lexeme()?;
        Ok(())
    }

    /// Parses one full subexpression. This is the entry point for delegate
    /// hooks building custom tokens with nested operands.
    pub fn parse_operand(&mut self) -> Result<NodeId, ExprError> {
        self.binary(0)
    }

    pub fn arena_mut(&mut self) -> &mut TokenArena {
        &mut self.arena
    }

    pub fn alloc(&mut self, token: Token) -> NodeId {
        self.arena.alloc(token)
    }

    fn primary(&mut self) -> Result<NodeId, ExprError> {
        let lexeme = self.look;
        self.advance()?;

        if let LexemeKind::Op(op) = lexeme.kind {
            let unary = match op {
                Op::Sub => Some(UnaryOp::Neg),
                Op::Not => Some(UnaryOp::Not),
                _ => None,
            };
            if let Some(op) = unary {
                let operand = self.primary()?;
                return Ok(self.arena.alloc(Token::Unary { op, operand }));
            }
        }

        match lexeme.kind {
            LexemeKind::Name(name) if self.look.kind == LexemeKind::Open => {
                return self.function_call(name);
            }
            LexemeKind::Number(v) => return Ok(self.arena.alloc(Token::Number(v))),
            LexemeKind::Str(s) => return Ok(self.arena.alloc(Token::Str(s.to_string()))),
            LexemeKind::Open => {
                let inner = self.binary(0)?;
                if self.look.kind != LexemeKind::Close {
                    return Err(ExprError::MissingCloseParen(self.look.pos));
                }
                self.advance()?;
                return Ok(self.arena.alloc(Token::Paren(inner)));
            }
            _ => {}
        }

        let delegate = self.delegate;
        if let Some(id) = delegate.create_token(&lexeme, self)? {
            return Ok(id);
        }
        Err(ExprError::UnexpectedToken(lexeme.pos))
    }

    fn function_call(&mut self, name: &str) -> Result<NodeId, ExprError> {
        let fun = self
            .delegate
            .find_function(name)
            .ok_or_else(|| ExprError::UnknownFunction(name.to_string()))?;

        self.advance()?; // consume '('
        let mut args = Vec::new();
        if self.look.kind != LexemeKind::Close {
            loop {
                args.push(self.binary(0)?);
                if self.look.kind == LexemeKind::Comma {
                    self.advance()?;
                    continue;
                }
                break;
            }
            if self.look.kind != LexemeKind::Close {
                return Err(ExprError::MissingCloseParen(self.look.pos));
            }
        }
        self.advance()?; // consume ')'

        if !fun.arity().accepts(args.len()) {
            return Err(ExprError::ArityMismatch {
                name: fun.name().to_string(),
                expected: fun.arity(),
                got: args.len(),
            });
        }
        let token = fun.make_token(&mut self.arena, args)?;
        Ok(self.arena.alloc(token))
    }

    /// Parses `primary (op binary)*`, folding left-associatively: operators
    /// of equal precedence bind left because the recursion requires strictly
    /// higher precedence on the right.
    fn binary(&mut self, min_precedence: u8) -> Result<NodeId, ExprError> {
        let mut left = self.primary()?;
        loop {
            let (op, precedence) = match self.look.kind {
                LexemeKind::Op(op) => match binary_op(op) {
                    Some((bop, prec)) if prec >= min_precedence => (bop, prec),
                    _ => break,
                },
                _ => break,
            };
            self.advance()?;
            let right = self.binary(precedence + 1)?;
            left = self.arena.alloc(Token::Binary { op, left, right });
        }
        Ok(left)
    }
}

fn binary_op(op: Op) -> Option<(BinaryOp, u8)> {
    let prec = op.binary_precedence()?;
    let bop = match op {
        Op::Eq => BinaryOp::Eq,
        Op::Lt => BinaryOp::Lt,
        Op::Gt => BinaryOp::Gt,
        Op::Le => BinaryOp::Le,
        Op::Ge => BinaryOp::Ge,
        Op::Add => BinaryOp::Add,
        Op::Sub => BinaryOp::Sub,
        Op::Mul => BinaryOp::Mul,
        Op::Div => BinaryOp::Div,
        Op::Pow => BinaryOp::Pow,
        Op::Not => return None,
    };
    Some((bop, prec))
}
