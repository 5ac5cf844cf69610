// AST (Abstract Syntax Tree) definitions for the transpiler

use std::fmt;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
}

impl BinOp {
    /// Target-syntax spelling
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
        }
    }

    /// Binding strength; higher binds tighter. All levels are left-associative.
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Eq => 1,
            BinOp::Add | BinOp::Sub => 2,
            BinOp::Mul | BinOp::Div => 3,
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg, // -x
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Neg => "-",
        }
    }
}

/// AST nodes. Every node records the source line it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Program {
        statements: Vec<AstNode>,
        line: usize,
    },
    Block {
        statements: Vec<AstNode>,
        line: usize,
    },

    // Statements
    If {
        condition: Box<AstNode>,
        then_branch: Box<AstNode>,
        else_branch: Option<Box<AstNode>>,
        line: usize,
    },
    While {
        condition: Box<AstNode>,
        body: Box<AstNode>,
        line: usize,
    },
    Print {
        expr: Box<AstNode>,
        line: usize,
    },
    Assign {
        name: String,
        value: Box<AstNode>,
        line: usize,
    },

    // Expressions
    BinaryOp {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
        line: usize,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<AstNode>,
        line: usize,
    },
    Variable {
        name: String,
        line: usize,
    },
    NumberLiteral {
        value: i32,
        line: usize,
    },
    StringLiteral {
        value: String,
        line: usize,
    },
    BooleanLiteral {
        value: bool,
        line: usize,
    },
}

impl AstNode {
    pub fn binary(op: BinOp, left: AstNode, right: AstNode, line: usize) -> Self {
        AstNode::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            line,
        }
    }

    pub fn unary(op: UnOp, operand: AstNode, line: usize) -> Self {
        AstNode::UnaryOp {
            op,
            operand: Box::new(operand),
            line,
        }
    }

    /// Get the source line of this node
    pub fn line(&self) -> usize {
        match self {
            AstNode::Program { line, .. }
            | AstNode::Block { line, .. }
            | AstNode::If { line, .. }
            | AstNode::While { line, .. }
            | AstNode::Print { line, .. }
            | AstNode::Assign { line, .. }
            | AstNode::BinaryOp { line, .. }
            | AstNode::UnaryOp { line, .. }
            | AstNode::Variable { line, .. }
            | AstNode::NumberLiteral { line, .. }
            | AstNode::StringLiteral { line, .. }
            | AstNode::BooleanLiteral { line, .. } => *line,
        }
    }

    /// Statements of a `Program` or `Block`; empty for every other node.
    pub fn statements(&self) -> &[AstNode] {
        match self {
            AstNode::Program { statements, .. } | AstNode::Block { statements, .. } => {
                statements
            }
            _ => &[],
        }
    }

    /// Indented multi-line rendering of the tree, one node per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        let pad = "  ".repeat(depth);
        let header = match self {
            AstNode::Program { statements, .. } => {
                format!("Program ({} statements)", statements.len())
            }
            AstNode::Block { statements, .. } => {
                format!("Block ({} statements)", statements.len())
            }
            AstNode::If { .. } => "If".to_string(),
            AstNode::While { .. } => "While".to_string(),
            AstNode::Print { .. } => "Print".to_string(),
            AstNode::Assign { name, .. } => format!("Assign: {}", name),
            AstNode::BinaryOp { op, .. } => format!("Binary Op: {}", op.symbol()),
            AstNode::UnaryOp { op, .. } => format!("Unary Op: {}", op.symbol()),
            AstNode::Variable { name, .. } => format!("Variable: {}", name),
            AstNode::NumberLiteral { value, .. } => format!("Number: {}", value),
            AstNode::StringLiteral { value, .. } => format!("String: {}", value),
            AstNode::BooleanLiteral { value, .. } => format!("Boolean: {}", value),
        };
        out.push_str(&pad);
        out.push_str(&header);
        out.push('\n');

        match self {
            AstNode::Program { statements, .. } | AstNode::Block { statements, .. } => {
                for stmt in statements {
                    stmt.dump_into(out, depth + 1);
                }
            }
            AstNode::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                condition.dump_into(out, depth + 1);
                then_branch.dump_into(out, depth + 1);
                if let Some(else_branch) = else_branch {
                    out.push_str(&pad);
                    out.push_str("Else\n");
                    else_branch.dump_into(out, depth + 1);
                }
            }
            AstNode::While {
                condition, body, ..
            } => {
                condition.dump_into(out, depth + 1);
                body.dump_into(out, depth + 1);
            }
            AstNode::Print { expr, .. } => expr.dump_into(out, depth + 1),
            AstNode::Assign { value, .. } => value.dump_into(out, depth + 1),
            AstNode::BinaryOp { left, right, .. } => {
                left.dump_into(out, depth + 1);
                right.dump_into(out, depth + 1);
            }
            AstNode::UnaryOp { operand, .. } => operand.dump_into(out, depth + 1),
            AstNode::Variable { .. }
            | AstNode::NumberLiteral { .. }
            | AstNode::StringLiteral { .. }
            | AstNode::BooleanLiteral { .. } => {}
        }
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        assert!(BinOp::Mul.precedence() > BinOp::Add.precedence());
        assert!(BinOp::Add.precedence() > BinOp::Eq.precedence());
        assert_eq!(BinOp::Div.precedence(), BinOp::Mul.precedence());
    }

    #[test]
    fn test_dump_nested_tree() {
        let tree = AstNode::Program {
            statements: vec![AstNode::Print {
                expr: Box::new(AstNode::binary(
                    BinOp::Add,
                    AstNode::Variable {
                        name: "ಕ".to_string(),
                        line: 1,
                    },
                    AstNode::NumberLiteral { value: 3, line: 1 },
                    1,
                )),
                line: 1,
            }],
            line: 1,
        };

        assert_eq!(
            tree.dump(),
            "Program (1 statements)\n  Print\n    Binary Op: +\n      Variable: ಕ\n      Number: 3\n"
        );
    }

    #[test]
    fn test_line_of_each_variant() {
        let node = AstNode::unary(UnOp::Neg, AstNode::NumberLiteral { value: 1, line: 4 }, 4);
        assert_eq!(node.line(), 4);
        assert!(node.statements().is_empty());
    }
}
