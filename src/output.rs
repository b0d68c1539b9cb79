//! Source regeneration for BlockScript syntax trees.
//!
//! Turns a parsed [`Block`] back into BlockScript text. Re-parsing the output
//! produces an equal tree: parentheses are inserted only where operator
//! precedence or left-associativity would otherwise regroup an expression.
//!
//! # Features
//!
//! - **Pretty output** via [`to_source()`] - one statement per line, 4-space indentation
//! - **Compact output** via [`to_source_compact()`] - the whole program on one line
//!
//! # Examples
//!
//! ```
//! use blockscript::{parse, output::to_source};
//!
//! let program = parse("global   x=1+2*3;").unwrap();
//! assert_eq!(to_source(&program), "global x = 1 + 2 * 3;");
//! ```

use crate::ast::{Assignment, Block, ElseBranch, Expr, IfStatement, Statement};

pub struct SourcePrinter {
    pretty: bool,
}

impl SourcePrinter {
    pub fn new(pretty: bool) -> Self {
        SourcePrinter { pretty }
    }

    /// Prints a whole program: its statements without surrounding braces.
    pub fn print(&self, program: &Block) -> String {
        let separator = if self.pretty { "\n" } else { " " };
        program
            .body
            .iter()
            .map(|stmt| format!("{};", self.print_statement(stmt, 0)))
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn print_block(&self, block: &Block, indent: usize) -> String {
        if block.is_empty() {
            return "{}".to_string();
        }

        if self.pretty {
            let mut result = "{\n".to_string();
            let items: Vec<String> = block
                .body
                .iter()
                .map(|stmt| {
                    format!(
                        "{}{};",
                        self.indent(indent + 1),
                        self.print_statement(stmt, indent + 1)
                    )
                })
                .collect();
            result.push_str(&items.join("\n"));
            result.push('\n');
            result.push_str(&self.indent(indent));
            result.push('}');
            result
        } else {
            let items: Vec<String> = block
                .body
                .iter()
                .map(|stmt| format!("{};", self.print_statement(stmt, indent)))
                .collect();
            format!("{{ {} }}", items.join(" "))
        }
    }

    fn print_statement(&self, stmt: &Statement, indent: usize) -> String {
        match stmt {
            Statement::VariableDeclaration { name, scope, init } => match init {
                Some(init) => format!("{} {} = {}", scope.keyword(), name, self.print_expr(init)),
                None => format!("{} {}", scope.keyword(), name),
            },
            Statement::FunctionDeclaration { name, params, body } => format!(
                "function {}({}) {}",
                name,
                params.join(", "),
                self.print_block(body, indent)
            ),
            Statement::Return(values) if values.is_empty() => "return".to_string(),
            Statement::Return(values) => format!("return {}", self.print_list(values)),
            Statement::If(if_stmt) => self.print_if(if_stmt, indent),
            Statement::For {
                start,
                running,
                check,
                body,
            } => format!(
                "for {} with {} while {} {}",
                self.print_assignment(start),
                self.print_statement(running, indent),
                self.print_expr(check),
                self.print_block(body, indent)
            ),
            Statement::ForIn {
                value_name,
                object,
                body,
            } => format!(
                "for {} in {} {}",
                value_name,
                self.print_expr(object),
                self.print_block(body, indent)
            ),
            Statement::Hardcode {
                start,
                stop,
                variable_name,
                body,
            } => format!(
                "hardcode {} to {} as {} {}",
                start,
                stop,
                variable_name,
                self.print_block(body, indent)
            ),
            Statement::Assignment(assignment) => self.print_assignment(assignment),
            Statement::Expression(expr) => self.print_expr(expr),
        }
    }

    fn print_if(&self, if_stmt: &IfStatement, indent: usize) -> String {
        let mut result = format!(
            "if {} {}",
            self.print_expr(&if_stmt.condition),
            self.print_block(&if_stmt.then_block, indent)
        );

        match &if_stmt.alternate {
            // `elif` reuses the `if` rendering with the keyword swapped.
            Some(ElseBranch::Elif(next)) => {
                result.push_str(" el");
                result.push_str(&self.print_if(next, indent));
            }
            Some(ElseBranch::Else(block)) => {
                result.push_str(" else ");
                result.push_str(&self.print_block(block, indent));
            }
            None => {}
        }
        result
    }

    fn print_assignment(&self, assignment: &Assignment) -> String {
        format!(
            "{} {} {}",
            self.print_expr(&assignment.left),
            assignment.op.symbol(),
            self.print_expr(&assignment.right)
        )
    }

    fn print_list(&self, exprs: &[Expr]) -> String {
        exprs
            .iter()
            .map(|e| self.print_expr(e))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn print_expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Number(n) => n.to_string(),
            Expr::Literal(s) => quote(s),
            Expr::Identifier(name) => name.clone(),
            Expr::Selector(selector) => format!("<{}>", selector),
            Expr::Member { value, member } => {
                format!("{}[{}]", self.print_expr(value), self.print_expr(member))
            }
            Expr::SelectorAccess { value, selector } => {
                format!("{}<{}>", self.print_expr(value), selector)
            }
            Expr::Binary { op, left, right } => {
                let precedence = op.precedence();
                let left = match left.as_ref() {
                    Expr::Binary { op: inner, .. } if inner.precedence() < precedence => {
                        format!("({})", self.print_expr(left))
                    }
                    _ => self.print_expr(left),
                };
                let right = match right.as_ref() {
                    Expr::Binary { op: inner, .. } if inner.precedence() <= precedence => {
                        format!("({})", self.print_expr(right))
                    }
                    _ => self.print_expr(right),
                };
                format!("{} {} {}", left, op.symbol(), right)
            }
            Expr::Call { callee, arguments } => {
                format!("{}({})", callee, self.print_list(arguments))
            }
            Expr::Array(elements) => format!("[{}]", self.print_list(elements)),
            Expr::Object(properties) if properties.is_empty() => "{}".to_string(),
            Expr::Object(properties) => {
                let items: Vec<String> = properties
                    .iter()
                    .map(|p| format!("{}: {}", self.print_expr(&p.key), self.print_expr(&p.value)))
                    .collect();
                format!("{{{}}}", items.join(", "))
            }
        }
    }

    fn indent(&self, level: usize) -> String {
        "    ".repeat(level)
    }
}

/// Picks a quote character the string does not contain.
fn quote(s: &str) -> String {
    if s.contains('"') {
        format!("'{}'", s)
    } else {
        format!("\"{}\"", s)
    }
}

// Convenience functions

/// Renders a program with one statement per line and indented blocks.
pub fn to_source(program: &Block) -> String {
    SourcePrinter::new(true).print(program)
}

/// Renders a program on a single line.
pub fn to_source_compact(program: &Block) -> String {
    SourcePrinter::new(false).print(program)
}

/// Renders a single expression.
pub fn expr_to_source(expr: &Expr) -> String {
    SourcePrinter::new(false).print_expr(expr)
}
