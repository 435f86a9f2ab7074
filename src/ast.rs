use std::{mem, rc::Rc};

/// An abstract syntax tree (AST) node.
///
/// `Expr` is a closed set: every construct of the language, statement forms
/// included, is one of these variants and evaluates to exactly one value.
/// Each variant records the source line it started on so runtime errors can
/// point back at the code.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal such as `3` or `2.5`.
    NumberLiteral {
        /// The literal value.
        value: f64,
        /// Line number in the source code.
        line:  usize,
    },
    /// A string literal. No escape sequences are recognised.
    StringLiteral {
        /// The contents between the quotes.
        value: String,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a binding by name.
    Identifier {
        /// Name of the binding.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// `[a, b, c]`
    ArrayLiteral {
        /// Element expressions, evaluated left to right.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// `{ key: value, ... }`
    ObjectLiteral {
        /// Key and value expression pairs in source order.
        entries: Vec<(String, Self)>,
        /// Line number in the source code.
        line:    usize,
    },
    /// A binary operation. Both operands are always evaluated.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A braced sequence of statements yielding the last one's value.
    Block {
        /// Statements inside the block.
        statements: Vec<Self>,
        /// Line number in the source code.
        line:       usize,
    },
    /// `var name = value;`
    VarDecl {
        /// The name being declared.
        name:  String,
        /// The initializer.
        value: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `name = value;`
    Assignment {
        /// The existing binding to update.
        name:  String,
        /// The new value.
        value: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `if (condition) { ... } else { ... }`
    If {
        /// The condition, tested for truthiness.
        condition:   Box<Self>,
        /// Block run when the condition holds.
        then_branch: Box<Self>,
        /// Optional block run otherwise.
        else_branch: Option<Box<Self>>,
        /// Line number in the source code.
        line:        usize,
    },
    /// `while (condition) { ... }`
    While {
        /// The loop condition.
        condition: Box<Self>,
        /// The loop body block.
        body:      Box<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// A named function declaration or an anonymous function expression.
    FunctionDecl(Rc<FunctionDef>),
    /// `name(arg, ...)`
    Call {
        /// Name the callee is looked up by.
        callee:    String,
        /// Argument expressions, evaluated left to right.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use ripple::ast::Expr;
    ///
    /// let expr = Expr::Identifier { name: "x".to_string(),
    ///                               line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::NumberLiteral { line, .. }
            | Self::StringLiteral { line, .. }
            | Self::Identifier { line, .. }
            | Self::ArrayLiteral { line, .. }
            | Self::ObjectLiteral { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::Block { line, .. }
            | Self::VarDecl { line, .. }
            | Self::Assignment { line, .. }
            | Self::If { line, .. }
            | Self::While { line, .. }
            | Self::Call { line, .. } => *line,
            Self::FunctionDecl(def) => def.line,
        }
    }
}

impl Expr {
    /// Moves every direct child of `self` into `out`, leaving empty blocks
    /// behind. A function body is only taken when nothing else shares it.
    fn take_children(&mut self, out: &mut Vec<Self>) {
        fn take(slot: &mut Expr) -> Expr {
            mem::replace(slot, Expr::Block { statements: Vec::new(),
                                             line:       0, })
        }

        match self {
            Self::NumberLiteral { .. } | Self::StringLiteral { .. } | Self::Identifier { .. } => {},
            Self::ArrayLiteral { elements: children, .. }
            | Self::Block { statements: children, .. }
            | Self::Call { arguments: children, .. } => out.append(children),
            Self::ObjectLiteral { entries, .. } => {
                out.extend(entries.drain(..).map(|(_, value)| value));
            },
            Self::BinaryOp { left, right, .. } => {
                out.push(take(left));
                out.push(take(right));
            },
            Self::VarDecl { value, .. } | Self::Assignment { value, .. } => out.push(take(value)),
            Self::If { condition,
                       then_branch,
                       else_branch,
                       .. } => {
                out.push(take(condition));
                out.push(take(then_branch));
                if let Some(else_branch) = else_branch {
                    out.push(take(else_branch));
                }
            },
            Self::While { condition, body, .. } => {
                out.push(take(condition));
                out.push(take(body));
            },
            Self::FunctionDecl(def) => {
                if let Some(def) = Rc::get_mut(def)
                   && let Some(body) = Rc::get_mut(&mut def.body)
                {
                    out.push(take(body));
                }
            },
        }
    }
}

/// Tears the tree down with an explicit work list. Parsing and evaluation
/// grow the stack for deep nesting, and dropping must not undo that by
/// recursing once per level.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.take_children(&mut pending);
        }
    }
}

/// A function definition shared between the AST and every function value
/// created from it.
///
/// The body is reference counted so closures and pending tasks can outlive
/// the program that declared them.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The declared name; `None` for anonymous function expressions.
    pub name:   Option<String>,
    /// The parameter names, bound positionally.
    pub params: Vec<String>,
    /// The body block.
    pub body:   Rc<Expr>,
    /// Line number in the source code.
    pub line:   usize,
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Equal to (`==`)
    Equal,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Equal => "==",
        };
        write!(f, "{operator}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: f64) -> Expr {
        Expr::NumberLiteral { value, line: 1 }
    }

    #[test]
    fn deeply_nested_tree_drops_without_overflow() {
        let mut expr = number(1.0);
        for _ in 0..200_000 {
            expr = Expr::BinaryOp { left:  Box::new(number(0.0)),
                                    op:    BinaryOperator::Sub,
                                    right: Box::new(expr),
                                    line:  1, };
        }
        drop(expr);
    }

    #[test]
    fn deeply_nested_blocks_and_branches_drop_without_overflow() {
        let mut expr = number(1.0);
        for depth in 0..200_000 {
            expr = if depth % 2 == 0 {
                Expr::Block { statements: vec![expr],
                              line:       1, }
            } else {
                Expr::If { condition:   Box::new(number(1.0)),
                           then_branch: Box::new(expr),
                           else_branch: None,
                           line:        1, }
            };
        }
        drop(expr);
    }

    #[test]
    fn shared_function_body_outlives_the_declaration() {
        let def = Rc::new(FunctionDef { name:   None,
                                        params: Vec::new(),
                                        body:   Rc::new(number(7.0)),
                                        line:   1, });
        let declaration = Expr::FunctionDecl(Rc::clone(&def));
        drop(declaration);
        assert_eq!(*def.body, number(7.0));
    }
}
