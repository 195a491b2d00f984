//! Tree printer for the syntax tree.
//!
//! Statements and declarations go one per line, indented two spaces per level
//! of nesting. Expressions are printed inline in source syntax, with nested
//! operators parenthesized.

use std::fmt::{self, Display};

use crate::ast::expression::Expression;
use crate::ast::statement::{Block, Statement};
use crate::ast::{FunctionDef, Program, Unit, VarDecl};

const INDENT: &str = "  ";

pub struct Formatter {
    buffer: String,
    indent_level: usize,
}

impl Formatter {
    fn new(indent_level: usize) -> Self {
        Self {
            buffer: String::new(),
            indent_level,
        }
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn write_line(&mut self, line: &str) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent();
        f(self);
        self.dedent();
    }

    fn finish(self) -> String {
        self.buffer
    }
}

/// Indented rendering of a syntax tree node.
pub trait Pretty {
    fn format(&self, fmt: &mut Formatter);

    /// Render starting `depth` levels deep.
    fn pretty(&self, depth: usize) -> String {
        let mut fmt = Formatter::new(depth);
        self.format(&mut fmt);
        fmt.finish()
    }
}

impl Pretty for Unit {
    fn format(&self, fmt: &mut Formatter) {
        match self {
            Unit::Program(program) => program.format(fmt),
            Unit::Function(func) => func.format(fmt),
            Unit::Declaration(decl) => decl.format(fmt),
            Unit::Statement(stmt) => stmt.format(fmt),
            Unit::Expression(expr) => expr.format(fmt),
        }
    }
}

impl Pretty for Program {
    fn format(&self, fmt: &mut Formatter) {
        fmt.write_line("Program");
        fmt.nested(|fmt| {
            fmt.write_line("Functions");
            fmt.nested(|fmt| self.functions.iter().for_each(|func| func.format(fmt)));
            fmt.write_line("Globals");
            fmt.nested(|fmt| self.globals.iter().for_each(|decl| decl.format(fmt)));
            fmt.write_line("Main");
            fmt.nested(|fmt| self.main.iter().for_each(|stmt| stmt.format(fmt)));
        });
    }
}

impl Pretty for FunctionDef {
    fn format(&self, fmt: &mut Formatter) {
        let params = self
            .params
            .iter()
            .map(declared_name)
            .collect::<Vec<_>>()
            .join(", ");
        fmt.write_line(&format!("Function {}({})", self.name.value, params));
        fmt.nested(|fmt| self.body.format(fmt));
    }
}

fn declared_name(decl: &VarDecl) -> String {
    match decl.ty {
        Some(ty) => format!("{} {}", ty, decl.name.value),
        None => format!("var {}", decl.name.value),
    }
}

impl Pretty for VarDecl {
    fn format(&self, fmt: &mut Formatter) {
        fmt.write_line(&format!("Declare {}", declared_name(self)));
    }
}

impl Pretty for Block {
    fn format(&self, fmt: &mut Formatter) {
        fmt.write_line("Block");
        fmt.nested(|fmt| {
            self.declarations.iter().for_each(|decl| decl.format(fmt));
            self.statements.iter().for_each(|stmt| stmt.format(fmt));
        });
    }
}

impl Pretty for Statement {
    fn format(&self, fmt: &mut Formatter) {
        match self {
            Statement::Block(block) => block.format(fmt),
            Statement::If(if_stmt) => {
                fmt.write_line(&format!("If {}", if_stmt.condition));
                fmt.nested(|fmt| {
                    fmt.write_line("Then");
                    fmt.nested(|fmt| if_stmt.then_branch.format(fmt));
                    if let Some(else_branch) = &if_stmt.else_branch {
                        fmt.write_line("Else");
                        fmt.nested(|fmt| else_branch.format(fmt));
                    }
                });
            }
            Statement::While(while_stmt) => {
                fmt.write_line(&format!("While {}", while_stmt.condition));
                fmt.nested(|fmt| while_stmt.body.format(fmt));
            }
            Statement::Assignment(assign) => {
                fmt.write_line(&format!("Assign {} := {}", assign.name.value, assign.value));
            }
            Statement::Return(ret) => fmt.write_line(&format!("Return {}", ret.value)),
        }
    }
}

impl Pretty for Expression {
    fn format(&self, fmt: &mut Formatter) {
        fmt.write_line(&format!("Expression {}", self));
    }
}

fn write_expression(expr: &Expression, nested: bool, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match expr {
        Expression::Integer(integer) => write!(f, "{}", integer.value),
        Expression::Boolean(boolean) => write!(f, "{}", boolean.value),
        Expression::Ident(ident) => f.write_str(&ident.value),
        Expression::BinaryOp(binop) => {
            if nested {
                f.write_str("(")?;
            }
            write_expression(&binop.left, true, f)?;
            write!(f, " {} ", binop.op)?;
            write_expression(&binop.right, true, f)?;
            if nested {
                f.write_str(")")?;
            }
            Ok(())
        }
        Expression::FunctionCall(call) => {
            write!(f, "{}(", call.func.value)?;
            for (index, arg) in call.args.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                write_expression(arg, false, f)?;
            }
            f.write_str(")")
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expression(self, false, f)
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty(0))
    }
}
