use super::lit::id_node;
use super::tokens::last_tok;
use super::tokens::tok;
use super::tokens::tok_any;
use super::Lowerer;
use crate::ast::expr::AssignTarget;
use crate::ast::expr::Expr;
use crate::ast::module::Program;
use crate::ast::node::Node;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::BreakStmt;
use crate::ast::stmt::CatchClause;
use crate::ast::stmt::ContinueStmt;
use crate::ast::stmt::DebuggerStmt;
use crate::ast::stmt::DoWhileStmt;
use crate::ast::stmt::EmptyStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::ForHead;
use crate::ast::stmt::ForInStmt;
use crate::ast::stmt::ForInit;
use crate::ast::stmt::ForOfStmt;
use crate::ast::stmt::ForStmt;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::LabelStmt;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::SwitchCase;
use crate::ast::stmt::SwitchStmt;
use crate::ast::stmt::ThrowStmt;
use crate::ast::stmt::TryStmt;
use crate::ast::stmt::WhileStmt;
use crate::ast::stmt::WithStmt;
use crate::cst::CstNode;
use crate::error::LowerResult;
use crate::token::Token;
use crate::SourceType;

/// Groupings of statements that are read through.
static STATEMENT_LIST_KINDS: &[&str] = &[
  "ClassStaticBlockBody",
  "ClassStaticBlockStatementList",
  "FunctionBody",
  "FunctionStatementList",
  "ModuleBody",
  "ModuleItemList",
  "ScriptBody",
  "StatementList",
];

static CASE_GROUPS: &[&str] = &["CaseBlock", "CaseClauses"];

// A string literal in parentheses is an ordinary expression statement, not a directive.
static PARENTHESIZED_KINDS: &[&str] = &[
  "CoverParenthesizedExpressionAndArrowParameterList",
  "ParenthesizedExpression",
];

fn flatten_statements<'a>(items: &[&'a CstNode], out: &mut Vec<&'a CstNode>) {
  for &c in items {
    if !c.is_token() && c.is_any(STATEMENT_LIST_KINDS) {
      let inner: Vec<&CstNode> = c.children.iter().collect();
      flatten_statements(&inner, out);
    } else if !c.is_token() {
      out.push(c);
    }
  }
}

/// The directive an expression statement spells, if it is a lone string literal: the raw text
/// without its quotes.
fn directive_text(stmt: &CstNode) -> Option<String> {
  let mut cur = stmt;
  loop {
    if cur.is_any(PARENTHESIZED_KINDS) {
      return None;
    }
    if cur.is_token() {
      break;
    }
    match cur.single_node() {
      // Descend only through productions that add nothing but a statement terminator.
      Some(inner) if cur.tokens().all(|t| t.is_tok(";")) => cur = inner,
      Some(_) => return None,
      None => {
        let mut toks = cur.tokens();
        let first = toks.next()?;
        if toks.any(|t| !t.is_tok(";")) {
          return None;
        }
        cur = first;
      }
    }
  }
  let raw = cur.text();
  let quoted = raw.len() >= 2
    && (raw.starts_with('"') || raw.starts_with('\''))
    && raw.ends_with(&raw[..1]);
  quoted.then(|| raw[1..raw.len() - 1].to_string())
}

fn split_semicolons<'a>(items: &[&'a CstNode]) -> Vec<Vec<&'a CstNode>> {
  let mut segments = vec![Vec::new()];
  for &c in items {
    if c.is_tok(";") {
      segments.push(Vec::new());
    } else if let Some(last) = segments.last_mut() {
      last.push(c);
    }
  }
  segments
}

impl<'s> Lowerer<'s> {
  pub fn program(&mut self, cst: &CstNode) -> LowerResult<Node<Program>> {
    let inferred = match cst.kind.as_str() {
      "Script" => SourceType::Script,
      "Module" => SourceType::Module,
      _ => return Err(cst.unsupported()),
    };
    let source_type = self.options().source_type.unwrap_or(inferred);
    let items: Vec<&CstNode> = cst.children.iter().collect();
    let body = self.statement_list(&items, true)?;
    Ok(Node::new(cst.loc, Program { source_type, body }))
  }

  /// Lowers a run of statements, reading through list groupings. With `directives`, the leading
  /// string-literal statements are marked as directives.
  pub fn statement_list(&mut self, items: &[&CstNode], directives: bool) -> LowerResult<Vec<Stmt>> {
    let mut flat = Vec::new();
    flatten_statements(items, &mut flat);
    let mut body = Vec::with_capacity(flat.len());
    let mut prologue = directives;
    for cst in flat {
      let mut stmt = self.stmt(cst)?;
      if prologue {
        match (&mut stmt, directive_text(cst)) {
          (Stmt::Expr(expr_stmt), Some(text)) => expr_stmt.stx.directive = Some(text),
          _ => prologue = false,
        }
      }
      body.push(stmt);
    }
    Ok(body)
  }

  /// The statements between the first `{` and the last `}` of `children`.
  pub fn braced_block(
    &mut self,
    node: &CstNode,
    children: &[CstNode],
    directives: bool,
  ) -> LowerResult<Node<BlockStmt>> {
    let open = children
      .iter()
      .position(|c| c.is_tok("{"))
      .ok_or_else(|| node.malformed("`{`"))?;
    let close = children
      .iter()
      .rposition(|c| c.is_tok("}"))
      .filter(|&c| c > open)
      .ok_or_else(|| node.malformed("`}`"))?;
    let inner: Vec<&CstNode> = children[open + 1..close].iter().collect();
    let body = self.statement_list(&inner, directives)?;
    Ok(Node::new(children[open].loc + children[close].loc, BlockStmt {
      body,
      open_brace: Some(Token::from_cst(&children[open])),
      close_brace: Some(Token::from_cst(&children[close])),
    }))
  }

  pub fn block(&mut self, node: &CstNode) -> LowerResult<Node<BlockStmt>> {
    if !node.has_tok("{") {
      let inner = node.require("Block")?;
      return self.block(inner);
    }
    let block = self.braced_block(node, &node.children, false)?;
    Ok(Node { loc: node.loc, ..block })
  }

  pub fn empty_stmt(&mut self, node: &CstNode) -> LowerResult<Stmt> {
    Ok(Stmt::Empty(Node::new(node.loc, EmptyStmt {
      semicolon: tok(node, ";"),
    })))
  }

  pub fn expr_stmt(&mut self, node: &CstNode) -> LowerResult<Stmt> {
    let expr = node.require_node("expression")?;
    Ok(Stmt::Expr(Node::new(node.loc, ExprStmt {
      expression: self.expr(expr)?,
      directive: None,
      semicolon: last_tok(node, ";"),
    })))
  }

  pub fn if_stmt(&mut self, node: &CstNode) -> LowerResult<Stmt> {
    let test = node.after_tok("(").ok_or_else(|| node.malformed("condition"))?;
    let consequent = node.after_tok(")").ok_or_else(|| node.malformed("consequent"))?;
    let alternate = match node.after_tok("else") {
      Some(alt) => Some(self.stmt(alt)?),
      None => None,
    };
    Ok(Stmt::If(Node::new(node.loc, IfStmt {
      test: self.expr(test)?,
      consequent: self.stmt(consequent)?,
      alternate,
      keyword: tok(node, "if"),
      else_keyword: tok(node, "else"),
      open_paren: tok(node, "("),
      close_paren: tok(node, ")"),
    })))
  }

  pub fn do_while_stmt(&mut self, node: &CstNode) -> LowerResult<Stmt> {
    let body = node.after_tok("do").ok_or_else(|| node.malformed("loop body"))?;
    let test = node.after_tok("(").ok_or_else(|| node.malformed("condition"))?;
    Ok(Stmt::DoWhile(Node::new(node.loc, DoWhileStmt {
      body: self.stmt(body)?,
      test: self.expr(test)?,
      do_keyword: tok(node, "do"),
      while_keyword: tok(node, "while"),
      semicolon: tok(node, ";"),
    })))
  }

  pub fn while_stmt(&mut self, node: &CstNode) -> LowerResult<Stmt> {
    let test = node.after_tok("(").ok_or_else(|| node.malformed("condition"))?;
    let body = node.after_tok(")").ok_or_else(|| node.malformed("loop body"))?;
    Ok(Stmt::While(Node::new(node.loc, WhileStmt {
      test: self.expr(test)?,
      body: self.stmt(body)?,
      keyword: tok(node, "while"),
      open_paren: tok(node, "("),
      close_paren: tok(node, ")"),
    })))
  }

  /// `ForStatement` and `ForInOfStatement`. The head decides the output kind: an `in` or `of`
  /// marker makes a for-in or for-of loop, otherwise the loop is the three-clause form.
  pub fn for_stmt(&mut self, node: &CstNode) -> LowerResult<Stmt> {
    let open = node.tok_pos("(").ok_or_else(|| node.malformed("`(`"))?;
    let close = node
      .children
      .iter()
      .rposition(|c| c.is_tok(")"))
      .filter(|&c| c > open)
      .ok_or_else(|| node.malformed("`)`"))?;
    let body = node.children[close + 1..]
      .iter()
      .find(|c| !c.is_token())
      .ok_or_else(|| node.malformed("loop body"))?;
    let head: Vec<&CstNode> = node.children[open + 1..close].iter().collect();
    let open_paren = Some(Token::from_cst(&node.children[open]));
    let close_paren = Some(Token::from_cst(&node.children[close]));
    let keyword = tok(node, "for");

    if let Some(marker_pos) = head.iter().position(|c| c.is_tok_any(&["in", "of"])) {
      let marker = head[marker_pos];
      let left = self.for_head(node, &head[..marker_pos])?;
      let right = head[marker_pos + 1..]
        .iter()
        .find(|c| !c.is_token())
        .ok_or_else(|| node.malformed("iterated expression"))?;
      let right = self.expr(right)?;
      let body = self.stmt(body)?;
      if marker.is_tok("in") {
        return Ok(Stmt::ForIn(Node::new(node.loc, ForInStmt {
          left,
          right,
          body,
          keyword,
          in_keyword: Some(Token::from_cst(marker)),
          open_paren,
          close_paren,
        })));
      }
      let await_keyword = node.children[..open]
        .iter()
        .find(|c| c.is_tok("await"))
        .map(Token::from_cst);
      return Ok(Stmt::ForOf(Node::new(node.loc, ForOfStmt {
        await_: await_keyword.is_some(),
        left,
        right,
        body,
        keyword,
        await_keyword,
        of_keyword: Some(Token::from_cst(marker)),
        open_paren,
        close_paren,
      })));
    }

    let mut segments = split_semicolons(&head).into_iter();
    let first = segments.next().unwrap_or_default();
    // A declaration node that carries its own `;` leaves the test in the first segment.
    let (init, test_segment) = match first.split_first() {
      Some((decl, rest)) if decl.is_any(&["LexicalDeclaration", "VariableStatement"]) && decl.has_tok(";") => {
        let decl = self.var_decl(decl)?;
        (Some(ForInit::VarDecl(decl)), rest.to_vec())
      }
      _ => (self.for_init(node, &first)?, segments.next().unwrap_or_default()),
    };
    let update_segment = segments.next().unwrap_or_default();
    let test = self.optional_clause(&test_segment)?;
    let update = self.optional_clause(&update_segment)?;
    Ok(Stmt::For(Node::new(node.loc, ForStmt {
      init,
      test,
      update,
      body: self.stmt(body)?,
      keyword,
      open_paren,
      close_paren,
    })))
  }

  fn optional_clause(&mut self, segment: &[&CstNode]) -> LowerResult<Option<Expr>> {
    match segment.iter().find(|c| !c.is_token()) {
      Some(expr) => Ok(Some(self.expr(expr)?)),
      None => Ok(None),
    }
  }

  fn for_init(&mut self, node: &CstNode, segment: &[&CstNode]) -> LowerResult<Option<ForInit>> {
    if segment.is_empty() {
      return Ok(None);
    }
    if segment
      .iter()
      .any(|c| c.is_tok_any(&["var", "let", "const"]) || c.is_any(&["VariableStatement", "LexicalDeclaration", "LetOrConst"]))
    {
      return Ok(Some(ForInit::VarDecl(self.declaration_list(node, segment)?)));
    }
    let expr = segment
      .iter()
      .find(|c| !c.is_token())
      .ok_or_else(|| node.malformed("loop initializer"))?;
    Ok(Some(ForInit::Expr(self.expr(expr)?)))
  }

  /// The left side of `for (… in/of …)`.
  fn for_head(&mut self, node: &CstNode, items: &[&CstNode]) -> LowerResult<ForHead> {
    let declares = items.iter().any(|c| {
      c.is_tok_any(&["var", "let", "const"])
        || c.is_any(&["ForDeclaration", "LetOrConst", "VariableStatement", "LexicalDeclaration"])
    });
    if declares {
      return self.declaration_list(node, items).map(ForHead::VarDecl);
    }
    let target = items
      .iter()
      .find(|c| !c.is_token())
      .ok_or_else(|| node.malformed("loop target"))?;
    Ok(match self.assign_target(target)? {
      AssignTarget::Pat(pat) => ForHead::Pat(pat),
      AssignTarget::Expr(expr) => ForHead::Expr(expr),
    })
  }

  pub fn continue_stmt(&mut self, node: &CstNode) -> LowerResult<Stmt> {
    let label = match node.nodes().next() {
      Some(label) => Some(id_node(label)?),
      None => None,
    };
    Ok(Stmt::Continue(Node::new(node.loc, ContinueStmt {
      label,
      keyword: tok(node, "continue"),
      semicolon: tok(node, ";"),
    })))
  }

  pub fn break_stmt(&mut self, node: &CstNode) -> LowerResult<Stmt> {
    let label = match node.nodes().next() {
      Some(label) => Some(id_node(label)?),
      None => None,
    };
    Ok(Stmt::Break(Node::new(node.loc, BreakStmt {
      label,
      keyword: tok(node, "break"),
      semicolon: tok(node, ";"),
    })))
  }

  pub fn return_stmt(&mut self, node: &CstNode) -> LowerResult<Stmt> {
    let argument = match node.nodes().next() {
      Some(arg) => Some(self.expr(arg)?),
      None => None,
    };
    Ok(Stmt::Return(Node::new(node.loc, ReturnStmt {
      argument,
      keyword: tok(node, "return"),
      semicolon: tok(node, ";"),
    })))
  }

  pub fn with_stmt(&mut self, node: &CstNode) -> LowerResult<Stmt> {
    let object = node.after_tok("(").ok_or_else(|| node.malformed("object"))?;
    let body = node.after_tok(")").ok_or_else(|| node.malformed("body"))?;
    Ok(Stmt::With(Node::new(node.loc, WithStmt {
      object: self.expr(object)?,
      body: self.stmt(body)?,
      keyword: tok(node, "with"),
    })))
  }

  pub fn switch_stmt(&mut self, node: &CstNode) -> LowerResult<Stmt> {
    let discriminant = node.after_tok("(").ok_or_else(|| node.malformed("discriminant"))?;
    let discriminant = self.expr(discriminant)?;
    let case_block = node.require("CaseBlock")?;
    let mut clauses = Vec::new();
    collect_clauses(case_block, &mut clauses);
    let mut cases = Vec::with_capacity(clauses.len());
    for clause in clauses {
      cases.push(self.switch_case(clause)?);
    }
    Ok(Stmt::Switch(Node::new(node.loc, SwitchStmt {
      discriminant,
      cases,
      keyword: tok(node, "switch"),
      open_brace: tok(case_block, "{"),
      close_brace: tok(case_block, "}"),
    })))
  }

  fn switch_case(&mut self, node: &CstNode) -> LowerResult<Node<SwitchCase>> {
    let colon = node.tok_pos(":").ok_or_else(|| node.malformed("`:`"))?;
    // `default` has no test; that is the only thing telling it apart from `case`.
    let test = if node.is("DefaultClause") {
      None
    } else {
      let test = node.children[..colon]
        .iter()
        .find(|c| !c.is_token())
        .ok_or_else(|| node.malformed("case test"))?;
      Some(self.expr(test)?)
    };
    let rest: Vec<&CstNode> = node.children[colon + 1..].iter().collect();
    let consequent = self.statement_list(&rest, false)?;
    Ok(Node::new(node.loc, SwitchCase {
      test,
      consequent,
      keyword: tok_any(node, &["case", "default"]),
      colon: Some(Token::from_cst(&node.children[colon])),
    }))
  }

  pub fn label_stmt(&mut self, node: &CstNode) -> LowerResult<Stmt> {
    let colon = node.tok_pos(":").ok_or_else(|| node.malformed("`:`"))?;
    let label = node.children[..colon]
      .iter()
      .next_back()
      .ok_or_else(|| node.malformed("label"))?;
    let body = node.children[colon + 1..]
      .iter()
      .find(|c| !c.is_token())
      .ok_or_else(|| node.malformed("labelled statement"))?;
    Ok(Stmt::Label(Node::new(node.loc, LabelStmt {
      label: id_node(label)?,
      body: self.stmt(body)?,
      colon: Some(Token::from_cst(&node.children[colon])),
    })))
  }

  pub fn throw_stmt(&mut self, node: &CstNode) -> LowerResult<Stmt> {
    let argument = node.require_node("thrown expression")?;
    Ok(Stmt::Throw(Node::new(node.loc, ThrowStmt {
      argument: self.expr(argument)?,
      keyword: tok(node, "throw"),
      semicolon: tok(node, ";"),
    })))
  }

  pub fn try_stmt(&mut self, node: &CstNode) -> LowerResult<Stmt> {
    let block = node.require_any(&["Block", "BlockStatement"], "try block")?;
    let block = self.block(block)?;
    let handler = match node.child("Catch") {
      Some(catch) => Some(self.catch_clause(catch)?),
      None => None,
    };
    let finally = node.child("Finally");
    let finalizer = match finally {
      Some(finally) => Some(self.block(finally.require_any(&["Block", "BlockStatement"], "finally block")?)?),
      None => None,
    };
    if handler.is_none() && finalizer.is_none() {
      return Err(node.malformed("catch or finally clause"));
    }
    Ok(Stmt::Try(Node::new(node.loc, TryStmt {
      block,
      handler,
      finalizer,
      keyword: tok(node, "try"),
      finally_keyword: finally.and_then(|f| tok(f, "finally")),
    })))
  }

  fn catch_clause(&mut self, node: &CstNode) -> LowerResult<Node<CatchClause>> {
    let param = match node.after_tok("(") {
      Some(param) => Some(self.pat(param)?),
      None => None,
    };
    let body = node.require_any(&["Block", "BlockStatement"], "catch block")?;
    Ok(Node::new(node.loc, CatchClause {
      param,
      body: self.block(body)?,
      keyword: tok(node, "catch"),
      open_paren: tok(node, "("),
      close_paren: tok(node, ")"),
    }))
  }

  pub fn debugger_stmt(&mut self, node: &CstNode) -> LowerResult<Stmt> {
    Ok(Stmt::Debugger(Node::new(node.loc, DebuggerStmt {
      keyword: tok(node, "debugger"),
      semicolon: tok(node, ";"),
    })))
  }
}

fn collect_clauses<'a>(node: &'a CstNode, out: &mut Vec<&'a CstNode>) {
  for c in node.nodes() {
    if c.is_any(CASE_GROUPS) {
      collect_clauses(c, out);
    } else {
      out.push(c);
    }
  }
}
