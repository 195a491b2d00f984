use std::cell::RefCell;
use std::rc::Rc;

use lachs::Span;
use tracing::trace;

use crate::ast::expression::{BinOpKind, BinaryOp, Expression, FunctionCall};
use crate::ast::statement::{Block, If, Statement, While};
use crate::ast::{FunctionDef, VarDecl};
use crate::scope::within_frame;

use super::error::RuntimeError;
use super::value::{Closure, Environment, Value};

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Completed,
    /// A `return` is unwinding to the innermost active call.
    Returning(Value),
}

/// Run `f` in a fresh frame of `env`.
///
/// No borrow of `env` is held while `f` runs, so calls made inside `f` may
/// push frames onto the same environment.
fn scoped<R>(
    env: &RefCell<Environment>,
    f: impl FnOnce(&RefCell<Environment>) -> Result<R, RuntimeError>,
) -> Result<R, RuntimeError> {
    within_frame(
        &mut &*env,
        |env| env.borrow_mut().enter_scope(),
        |env| env.borrow_mut().exit_scope(),
        |env| f(*env),
    )
}

impl Expression {
    /// Evaluate both operands of every operator, left to right.
    pub fn eval(&self, env: &RefCell<Environment>) -> Result<Value, RuntimeError> {
        match self {
            Expression::Integer(integer) => Ok(Value::Integer(integer.value)),
            Expression::Boolean(boolean) => Ok(Value::Boolean(boolean.value)),
            Expression::Ident(ident) => {
                let value = env
                    .borrow()
                    .lookup(&ident.value)
                    .cloned()
                    .map_err(|err| RuntimeError::from_scope_error(err, ident.position.clone()))?;
                match value {
                    Value::Uninitialized => Err(RuntimeError::UseOfUninitialized {
                        name: ident.value.clone(),
                        span: ident.position.clone(),
                    }),
                    value => Ok(value),
                }
            }
            Expression::BinaryOp(binop) => binop.eval(env),
            Expression::FunctionCall(call) => call.eval(env),
        }
    }
}

fn expect_int(value: Value, span: &Span) -> Result<i64, RuntimeError> {
    match value {
        Value::Integer(value) => Ok(value),
        other => Err(RuntimeError::InternalCast {
            expected: "integer",
            found: other.kind(),
            span: span.clone(),
        }),
    }
}

fn expect_bool(value: Value, span: &Span) -> Result<bool, RuntimeError> {
    match value {
        Value::Boolean(value) => Ok(value),
        other => Err(RuntimeError::InternalCast {
            expected: "boolean",
            found: other.kind(),
            span: span.clone(),
        }),
    }
}

impl BinaryOp {
    fn eval(&self, env: &RefCell<Environment>) -> Result<Value, RuntimeError> {
        let left = self.left.eval(env)?;
        let right = self.right.eval(env)?;
        let (lspan, rspan) = (self.left.position(), self.right.position());

        let value = match self.op {
            BinOpKind::Add => {
                Value::Integer(expect_int(left, &lspan)?.wrapping_add(expect_int(right, &rspan)?))
            }
            BinOpKind::Sub => {
                Value::Integer(expect_int(left, &lspan)?.wrapping_sub(expect_int(right, &rspan)?))
            }
            BinOpKind::Mul => {
                Value::Integer(expect_int(left, &lspan)?.wrapping_mul(expect_int(right, &rspan)?))
            }
            BinOpKind::Div => {
                let dividend = expect_int(left, &lspan)?;
                let divisor = expect_int(right, &rspan)?;
                if divisor == 0 {
                    return Err(RuntimeError::DivisionByZero {
                        span: self.position.clone(),
                    });
                }
                Value::Integer(dividend.wrapping_div(divisor))
            }
            BinOpKind::Lt => {
                Value::Boolean(expect_int(left, &lspan)? < expect_int(right, &rspan)?)
            }
            BinOpKind::Gt => {
                Value::Boolean(expect_int(left, &lspan)? > expect_int(right, &rspan)?)
            }
            BinOpKind::And => {
                Value::Boolean(expect_bool(left, &lspan)? & expect_bool(right, &rspan)?)
            }
            BinOpKind::Or => {
                Value::Boolean(expect_bool(left, &lspan)? | expect_bool(right, &rspan)?)
            }
            BinOpKind::Eq => match (left, right) {
                (Value::Integer(l), Value::Integer(r)) => Value::Boolean(l == r),
                (Value::Boolean(l), Value::Boolean(r)) => Value::Boolean(l == r),
                (Value::Integer(_), other) | (Value::Boolean(_), other) => {
                    return Err(RuntimeError::InternalCast {
                        expected: "comparable",
                        found: other.kind(),
                        span: rspan,
                    });
                }
                (other, _) => {
                    return Err(RuntimeError::InternalCast {
                        expected: "comparable",
                        found: other.kind(),
                        span: lspan,
                    });
                }
            },
        };

        Ok(value)
    }
}

impl FunctionCall {
    /// Arguments are evaluated in the caller's environment before anything
    /// is bound.
    fn eval(&self, env: &RefCell<Environment>) -> Result<Value, RuntimeError> {
        let name = &self.func.value;
        let callee = env
            .borrow()
            .lookup(name)
            .cloned()
            .map_err(|err| RuntimeError::from_scope_error(err, self.func.position.clone()))?;

        let closure = match callee {
            Value::Closure(closure) => closure,
            other => {
                return Err(RuntimeError::NotAFunction {
                    name: name.clone(),
                    kind: other.kind(),
                    span: self.func.position.clone(),
                });
            }
        };

        let expected = closure.function.params.len();
        if expected != self.args.len() {
            return Err(RuntimeError::ArityMismatch {
                name: name.clone(),
                expected,
                got: self.args.len(),
                span: self.position.clone(),
            });
        }

        let args = self
            .args
            .iter()
            .map(|arg| arg.eval(env))
            .collect::<Result<Vec<_>, _>>()?;

        Closure::invoke(&closure, args)
    }
}

impl Closure {
    /// Run the body in a new frame on top of the captured environment.
    ///
    /// The frame is popped again when the call ends, but assignments to
    /// captured variables stay in the closure for its next call. Recursive
    /// calls stack their frames on the same environment.
    ///
    /// The function's own name is bound next to the parameters so the body can
    /// call itself, unless a parameter of the same name shadows it.
    pub fn invoke(this: &Rc<Closure>, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let function = &this.function;
        let name = &function.name.value;
        trace!(function = %name, depth = this.env.borrow().depth(), "call");

        let flow = scoped(&this.env, |env| {
            for (param, arg) in function.params.iter().zip(args) {
                env.borrow_mut()
                    .declare(&param.name.value, arg)
                    .map_err(|err| RuntimeError::from_scope_error(err, param.position.clone()))?;
            }
            let shadowed = env.borrow().is_declared_locally(name);
            if !shadowed {
                env.borrow_mut()
                    .declare(name, Value::Closure(Rc::clone(this)))?;
            }
            function.body.exec_contents(env)
        })?;

        match flow {
            Flow::Returning(value) => Ok(value),
            Flow::Completed => Err(RuntimeError::MissingReturn {
                name: name.clone(),
                span: function.position.clone(),
            }),
        }
    }
}

impl FunctionDef {
    /// Bind a closure over a snapshot of `env` under the function's name.
    pub fn define(&self, env: &RefCell<Environment>) -> Result<Value, RuntimeError> {
        let captured = env.borrow().clone();
        let depth = captured.depth();
        let closure = Value::Closure(Rc::new(Closure::new(Rc::new(self.clone()), captured)));
        env.borrow_mut()
            .declare(&self.name.value, closure.clone())
            .map_err(|err| RuntimeError::from_scope_error(err, self.name.position.clone()))?;
        trace!(function = %self.name.value, captured = depth, "created closure");
        Ok(closure)
    }
}

impl VarDecl {
    pub fn declare(&self, env: &RefCell<Environment>) -> Result<(), RuntimeError> {
        env.borrow_mut()
            .declare(&self.name.value, Value::default_for(self.ty))
            .map_err(|err| RuntimeError::from_scope_error(err, self.position.clone()))
    }
}

impl Block {
    /// Declarations and statements of this block in the current frame.
    pub fn exec_contents(&self, env: &RefCell<Environment>) -> Result<Flow, RuntimeError> {
        for decl in &self.declarations {
            decl.declare(env)?;
        }
        for stmt in &self.statements {
            if let Flow::Returning(value) = stmt.exec(env)? {
                return Ok(Flow::Returning(value));
            }
        }
        Ok(Flow::Completed)
    }
}

impl Statement {
    pub fn exec(&self, env: &RefCell<Environment>) -> Result<Flow, RuntimeError> {
        match self {
            Statement::Block(block) => scoped(env, |env| block.exec_contents(env)),
            Statement::If(if_stmt) => if_stmt.exec(env),
            Statement::While(while_stmt) => while_stmt.exec(env),
            Statement::Assignment(assign) => {
                let value = assign.value.eval(env)?;
                env.borrow_mut()
                    .assign(&assign.name.value, value)
                    .map_err(|err| RuntimeError::from_scope_error(err, assign.name.position.clone()))?;
                Ok(Flow::Completed)
            }
            Statement::Return(ret) => Ok(Flow::Returning(ret.value.eval(env)?)),
        }
    }
}

impl If {
    fn exec(&self, env: &RefCell<Environment>) -> Result<Flow, RuntimeError> {
        let condition = expect_bool(self.condition.eval(env)?, &self.condition.position())?;
        if condition {
            scoped(env, |env| self.then_branch.exec(env))
        } else if let Some(else_branch) = &self.else_branch {
            scoped(env, |env| else_branch.exec(env))
        } else {
            Ok(Flow::Completed)
        }
    }
}

impl While {
    fn exec(&self, env: &RefCell<Environment>) -> Result<Flow, RuntimeError> {
        loop {
            let condition = expect_bool(self.condition.eval(env)?, &self.condition.position())?;
            if !condition {
                return Ok(Flow::Completed);
            }
            if let Flow::Returning(value) = scoped(env, |env| self.body.exec(env))? {
                return Ok(Flow::Returning(value));
            }
        }
    }
}
