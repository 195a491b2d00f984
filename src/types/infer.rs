//! Type inference for one unit at a time.
//!
//! [`Infer`] keeps a [`TypeEnv`] and a [`Substitution`] alive for the whole
//! session. Each call to [`Infer::infer`] checks one [`Unit`] against them and
//! leaves behind the declarations the unit made, so later units can refer to
//! earlier variables and functions. A unit that fails to check leaves nothing
//! behind: both the environment and the substitution are restored from a
//! checkpoint taken before the unit started.

use lachs::Span;
use tracing::debug;

use super::env::TypeEnv;
use super::error::TypeError;
use super::subst::Substitution;
use super::ty::Type;
use super::unify::unify;
use crate::ast::expression::{BinOpKind, BinaryOp, Expression, FunctionCall};
use crate::ast::statement::{Assignment, Block, If, Return, Statement, While};
use crate::ast::{FunctionDef, Program, Unit, VarDecl};
use crate::scope::within_frame;

#[derive(Debug, Clone, Default)]
pub struct Infer {
    env: TypeEnv,
    subst: Substitution,
    /// Return type of every function body currently being checked, innermost
    /// last.
    return_types: Vec<Type>,
}

impl Infer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `unit`, returning its type if it has one.
    ///
    /// Bare expressions yield their type and function definitions yield their
    /// function type; declarations, statements and whole programs yield `None`.
    pub fn infer(&mut self, unit: &Unit) -> Result<Option<Type>, TypeError> {
        let checkpoint = (self.env.clone(), self.subst.clone());

        match self.infer_unit(unit) {
            Ok(ty) => Ok(ty.map(|ty| self.subst.apply(&ty))),
            Err(err) => {
                debug!(error = %err, "unit rejected, rolling back type environment");
                (self.env, self.subst) = checkpoint;
                self.return_types.clear();
                Err(err)
            }
        }
    }

    /// Fully resolved type of a global binding.
    pub fn lookup(&mut self, name: &str) -> Option<Type> {
        let ty = self.env.lookup(name).ok()?.clone();
        Some(self.subst.apply(&ty))
    }

    /// Every global binding with its fully resolved type, sorted by name.
    pub fn globals(&mut self) -> Vec<(String, Type)> {
        let bindings: Vec<(String, Type)> = self
            .env
            .globals()
            .into_iter()
            .map(|(name, ty)| (name.to_string(), ty.clone()))
            .collect();

        bindings
            .into_iter()
            .map(|(name, ty)| (name, self.subst.apply(&ty)))
            .collect()
    }

    fn infer_unit(&mut self, unit: &Unit) -> Result<Option<Type>, TypeError> {
        match unit {
            Unit::Program(program) => {
                self.infer_program(program)?;
                Ok(None)
            }
            Unit::Function(func) => self.infer_function(func).map(Some),
            Unit::Declaration(decl) => {
                self.declare_var(decl)?;
                Ok(None)
            }
            Unit::Statement(stmt) => {
                self.check_statement(stmt)?;
                Ok(None)
            }
            Unit::Expression(expr) => self.infer_expr(expr).map(Some),
        }
    }

    /// Functions first, then globals, then the main statements: the same
    /// order the interpreter runs them in.
    fn infer_program(&mut self, program: &Program) -> Result<(), TypeError> {
        for func in &program.functions {
            self.infer_function(func)?;
        }
        for global in &program.globals {
            self.declare_var(global)?;
        }
        for stmt in &program.main {
            self.check_statement(stmt)?;
        }
        Ok(())
    }

    /// Run `f` inside a new frame of the type environment, leaving the frame
    /// on every path.
    fn in_scope<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, TypeError>,
    ) -> Result<R, TypeError> {
        within_frame(
            self,
            |this| this.env.enter_scope(),
            |this| this.env.exit_scope(),
            f,
        )
    }

    fn unify_at(&mut self, expected: &Type, found: &Type, span: &Span) -> Result<(), TypeError> {
        unify(&mut self.subst, expected, found)
            .map_err(|err| TypeError::from_unify_error(err, span.clone()))
    }

    fn declare(&mut self, name: &str, ty: Type, span: &Span) -> Result<(), TypeError> {
        self.env
            .declare(name, ty)
            .map_err(|err| TypeError::from_scope_error(err, span.clone()))
    }

    fn declared_type(&mut self, decl: &VarDecl) -> Type {
        match decl.ty {
            Some(name) => name.into(),
            None => Type::Var(self.subst.fresh_var()),
        }
    }

    fn declare_var(&mut self, decl: &VarDecl) -> Result<(), TypeError> {
        let ty = self.declared_type(decl);
        self.declare(&decl.name.value, ty, &decl.position)
    }

    /// Declare the function in the current scope, then check its body in a
    /// nested frame holding the parameters.
    ///
    /// The name is declared before the body is checked so that the body can
    /// call the function recursively.
    pub fn infer_function(&mut self, func: &FunctionDef) -> Result<Type, TypeError> {
        let params: Vec<Type> = func
            .params
            .iter()
            .map(|param| self.declared_type(param))
            .collect();
        let ret = Type::Var(self.subst.fresh_var());
        let func_ty = Type::func(params.clone(), ret.clone());

        self.declare(&func.name.value, func_ty.clone(), &func.name.position)?;

        self.return_types.push(ret);
        let checked = self.in_scope(|this| {
            for (param, ty) in func.params.iter().zip(params) {
                this.declare(&param.name.value, ty, &param.position)?;
            }
            this.check_block(&func.body)
        });
        self.return_types.pop();
        checked?;

        let func_ty = self.subst.apply(&func_ty);
        debug!(name = %func.name.value, ty = %func_ty, "checked function");
        Ok(func_ty)
    }

    fn check_block(&mut self, block: &Block) -> Result<(), TypeError> {
        for decl in &block.declarations {
            self.declare_var(decl)?;
        }
        for stmt in &block.statements {
            self.check_statement(stmt)?;
        }
        Ok(())
    }

    fn check_statement(&mut self, stmt: &Statement) -> Result<(), TypeError> {
        match stmt {
            Statement::Block(block) => self.in_scope(|this| this.check_block(block)),
            Statement::If(if_stmt) => self.check_if(if_stmt),
            Statement::While(while_stmt) => self.check_while(while_stmt),
            Statement::Assignment(assign) => self.check_assignment(assign),
            Statement::Return(ret) => self.check_return(ret),
        }
    }

    fn check_condition(&mut self, condition: &Expression) -> Result<(), TypeError> {
        let ty = self.infer_expr(condition)?;
        self.unify_at(&Type::Bool, &ty, &condition.position())
            .map_err(|err| err.with_context("conditions must be boolean"))
    }

    fn check_if(&mut self, if_stmt: &If) -> Result<(), TypeError> {
        self.check_condition(&if_stmt.condition)?;
        self.in_scope(|this| this.check_statement(&if_stmt.then_branch))?;
        if let Some(else_branch) = &if_stmt.else_branch {
            self.in_scope(|this| this.check_statement(else_branch))?;
        }
        Ok(())
    }

    fn check_while(&mut self, while_stmt: &While) -> Result<(), TypeError> {
        self.check_condition(&while_stmt.condition)?;
        self.in_scope(|this| this.check_statement(&while_stmt.body))
    }

    fn check_assignment(&mut self, assign: &Assignment) -> Result<(), TypeError> {
        let target = self
            .env
            .lookup(&assign.name.value)
            .map_err(|err| TypeError::from_scope_error(err, assign.name.position.clone()))?
            .clone();
        let value = self.infer_expr(&assign.value)?;
        self.unify_at(&target, &value, &assign.position)
            .map_err(|err| err.with_context(format!("in assignment to '{}'", assign.name.value)))
    }

    fn check_return(&mut self, ret: &Return) -> Result<(), TypeError> {
        let Some(expected) = self.return_types.last().cloned() else {
            return Err(TypeError::ReturnOutsideFunction {
                span: ret.position.clone(),
            });
        };
        let found = self.infer_expr(&ret.value)?;
        self.unify_at(&expected, &found, &ret.position)
            .map_err(|err| err.with_context("all return statements of a function must agree"))
    }

    pub fn infer_expr(&mut self, expr: &Expression) -> Result<Type, TypeError> {
        match expr {
            Expression::Integer(_) => Ok(Type::Int),
            Expression::Boolean(_) => Ok(Type::Bool),
            Expression::Ident(ident) => self
                .env
                .lookup(&ident.value)
                .cloned()
                .map_err(|err| TypeError::from_scope_error(err, ident.position.clone())),
            Expression::BinaryOp(binop) => self.infer_binop(binop),
            Expression::FunctionCall(call) => self.infer_call(call),
        }
    }

    fn infer_binop(&mut self, binop: &BinaryOp) -> Result<Type, TypeError> {
        let left = self.infer_expr(&binop.left)?;
        let right = self.infer_expr(&binop.right)?;
        let context = || format!("in operands of '{}'", binop.op);

        let (operand, result) = match binop.op {
            BinOpKind::Add | BinOpKind::Sub | BinOpKind::Mul | BinOpKind::Div => {
                (Type::Int, Type::Int)
            }
            BinOpKind::Lt | BinOpKind::Gt => (Type::Int, Type::Bool),
            BinOpKind::And | BinOpKind::Or => (Type::Bool, Type::Bool),
            BinOpKind::Eq => return self.infer_equality(binop, left, right),
        };

        self.unify_at(&operand, &left, &binop.left.position())
            .map_err(|err| err.with_context(context()))?;
        self.unify_at(&operand, &right, &binop.right.position())
            .map_err(|err| err.with_context(context()))?;
        Ok(result)
    }

    /// Both sides of `==` must agree on one base type. When that type is still
    /// a variable, the requirement is recorded on it and checked once it is
    /// bound.
    fn infer_equality(
        &mut self,
        binop: &BinaryOp,
        left: Type,
        right: Type,
    ) -> Result<Type, TypeError> {
        self.unify_at(&left, &right, &binop.position)
            .map_err(|err| err.with_context("both sides of '==' must have the same type"))?;
        self.subst
            .require_base(&left)
            .map_err(|err| TypeError::from_unify_error(err, binop.left.position()))?;
        Ok(Type::Bool)
    }

    fn infer_call(&mut self, call: &FunctionCall) -> Result<Type, TypeError> {
        let name = &call.func.value;
        let callee = self
            .env
            .lookup(name)
            .map_err(|err| TypeError::from_scope_error(err, call.func.position.clone()))?
            .clone();

        let (params, ret) = match self.subst.resolve(&callee) {
            Type::Func(params, ret) => (params, ret),
            other => {
                return Err(TypeError::NotAFunction {
                    name: name.clone(),
                    ty: self.subst.apply(&other),
                    span: call.func.position.clone(),
                });
            }
        };

        if params.len() != call.args.len() {
            return Err(TypeError::ArityMismatch {
                name: name.clone(),
                expected: params.len(),
                found: call.args.len(),
                span: call.position.clone(),
            });
        }

        for (index, (param, arg)) in params.iter().zip(&call.args).enumerate() {
            let arg_ty = self.infer_expr(arg)?;
            self.unify_at(param, &arg_ty, &arg.position()).map_err(|err| {
                err.with_context(format!("in argument {} of call to '{}'", index + 1, name))
            })?;
        }

        Ok(*ret)
    }
}
