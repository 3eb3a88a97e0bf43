//! Statement and expression anchors collected from the swc AST.
//!
//! Labels use ESTree node names so output reads the same as for any other
//! ESTree front end.

use serde::Serialize;
use swc_common::Spanned;
use swc_ecma_ast::{BinaryOp, Decl, Expr, Module, ModuleDecl, ModuleItem, Stmt};
use swc_ecma_visit::{Visit, VisitWith};

use crate::token::{Ranged, Span};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceNode {
    #[serde(rename = "type")]
    pub label: &'static str,
    #[serde(rename = "range")]
    pub span: Span,
    /// Direct child of the program.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub top_level: bool,
}

impl Ranged for SourceNode {
    fn span(&self) -> Span {
        self.span
    }
}

/// Collects statements (any depth) and expressions from `module`, in source
/// order. `base` is the position of the file's first byte in the source map.
pub fn collect_nodes(module: &Module, base: u32) -> Vec<SourceNode> {
    let mut collector = NodeCollector {
        base,
        depth: 0,
        nodes: Vec::new(),
    };
    module.visit_with(&mut collector);
    collector.nodes.sort_by_key(|node| (node.span.start, std::cmp::Reverse(node.span.end)));
    collector.nodes
}

struct NodeCollector {
    base: u32,
    depth: usize,
    nodes: Vec<SourceNode>,
}

impl NodeCollector {
    fn push(&mut self, label: &'static str, span: swc_common::Span) {
        if span.is_dummy() {
            return;
        }
        self.nodes.push(SourceNode {
            label,
            span: Span::new(
                span.lo.0.saturating_sub(self.base),
                span.hi.0.saturating_sub(self.base),
            ),
            top_level: self.depth == 0,
        });
    }

    fn nested(&mut self, visit: impl FnOnce(&mut Self)) {
        self.depth += 1;
        visit(self);
        self.depth -= 1;
    }
}

impl Visit for NodeCollector {
    fn visit_module_item(&mut self, item: &ModuleItem) {
        match item {
            ModuleItem::ModuleDecl(decl) => {
                self.push(module_decl_label(decl), decl.span());
                self.nested(|this| decl.visit_children_with(this));
            }
            ModuleItem::Stmt(stmt) => stmt.visit_with(self),
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        self.push(stmt_label(stmt), stmt.span());
        self.nested(|this| stmt.visit_children_with(this));
    }

    fn visit_expr(&mut self, expr: &Expr) {
        self.push(expr_label(expr), expr.span());
        self.nested(|this| expr.visit_children_with(this));
    }
}

fn module_decl_label(decl: &ModuleDecl) -> &'static str {
    match decl {
        ModuleDecl::Import(_) => "ImportDeclaration",
        ModuleDecl::ExportDecl(_) | ModuleDecl::ExportNamed(_) => "ExportNamedDeclaration",
        ModuleDecl::ExportDefaultDecl(_) | ModuleDecl::ExportDefaultExpr(_) => {
            "ExportDefaultDeclaration"
        }
        ModuleDecl::ExportAll(_) => "ExportAllDeclaration",
        _ => "ModuleDeclaration",
    }
}

fn stmt_label(stmt: &Stmt) -> &'static str {
    match stmt {
        Stmt::Block(_) => "BlockStatement",
        Stmt::Empty(_) => "EmptyStatement",
        Stmt::Debugger(_) => "DebuggerStatement",
        Stmt::With(_) => "WithStatement",
        Stmt::Return(_) => "ReturnStatement",
        Stmt::Labeled(_) => "LabeledStatement",
        Stmt::Break(_) => "BreakStatement",
        Stmt::Continue(_) => "ContinueStatement",
        Stmt::If(_) => "IfStatement",
        Stmt::Switch(_) => "SwitchStatement",
        Stmt::Throw(_) => "ThrowStatement",
        Stmt::Try(_) => "TryStatement",
        Stmt::While(_) => "WhileStatement",
        Stmt::DoWhile(_) => "DoWhileStatement",
        Stmt::For(_) => "ForStatement",
        Stmt::ForIn(_) => "ForInStatement",
        Stmt::ForOf(_) => "ForOfStatement",
        Stmt::Expr(_) => "ExpressionStatement",
        Stmt::Decl(decl) => match decl {
            Decl::Var(_) => "VariableDeclaration",
            Decl::Fn(_) => "FunctionDeclaration",
            Decl::Class(_) => "ClassDeclaration",
            Decl::TsInterface(_) => "TSInterfaceDeclaration",
            Decl::TsTypeAlias(_) => "TSTypeAliasDeclaration",
            Decl::TsEnum(_) => "TSEnumDeclaration",
            Decl::TsModule(_) => "TSModuleDeclaration",
            _ => "Declaration",
        },
    }
}

fn expr_label(expr: &Expr) -> &'static str {
    match expr {
        Expr::This(_) => "ThisExpression",
        Expr::Array(_) => "ArrayExpression",
        Expr::Object(_) => "ObjectExpression",
        Expr::Fn(_) => "FunctionExpression",
        Expr::Unary(_) => "UnaryExpression",
        Expr::Update(_) => "UpdateExpression",
        Expr::Bin(bin) => match bin.op {
            BinaryOp::LogicalAnd | BinaryOp::LogicalOr | BinaryOp::NullishCoalescing => {
                "LogicalExpression"
            }
            _ => "BinaryExpression",
        },
        Expr::Assign(_) => "AssignmentExpression",
        Expr::Member(_) | Expr::SuperProp(_) => "MemberExpression",
        Expr::Cond(_) => "ConditionalExpression",
        Expr::Call(_) => "CallExpression",
        Expr::New(_) => "NewExpression",
        Expr::Seq(_) => "SequenceExpression",
        Expr::Ident(_) => "Identifier",
        Expr::Lit(_) => "Literal",
        Expr::Tpl(_) => "TemplateLiteral",
        Expr::TaggedTpl(_) => "TaggedTemplateExpression",
        Expr::Arrow(_) => "ArrowFunctionExpression",
        Expr::Class(_) => "ClassExpression",
        Expr::Yield(_) => "YieldExpression",
        Expr::Await(_) => "AwaitExpression",
        Expr::Paren(_) => "ParenthesizedExpression",
        Expr::JSXElement(_) => "JSXElement",
        Expr::JSXFragment(_) => "JSXFragment",
        Expr::TsAs(_) => "TSAsExpression",
        Expr::TsNonNull(_) => "TSNonNullExpression",
        Expr::TsSatisfies(_) => "TSSatisfiesExpression",
        Expr::OptChain(_) => "ChainExpression",
        _ => "Expression",
    }
}
