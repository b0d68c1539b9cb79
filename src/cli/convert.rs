//! Syntax tree and token -> JSON conversion utilities

use crate::ast::{Assignment, Block, ElseBranch, Expr, IfStatement, Statement, Token};
use serde_json::{Value, json};

fn number(n: f64) -> Value {
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Convert a token buffer to a JSON array
pub fn tokens_to_json(tokens: &[Token]) -> Value {
    Value::Array(
        tokens
            .iter()
            .map(|token| {
                json!({
                    "type": format!("{:?}", token.kind),
                    "value": token.value,
                    "start": token.span.start,
                    "stop": token.span.stop,
                })
            })
            .collect(),
    )
}

/// Convert a program to a JSON tree, tagging each node with `"type"`
pub fn program_to_json(program: &Block) -> Value {
    block_to_json(program)
}

fn block_to_json(block: &Block) -> Value {
    json!({
        "type": "BlockStatement",
        "body": block.body.iter().map(statement_to_json).collect::<Vec<_>>(),
    })
}

fn identifier(name: &str) -> Value {
    json!({ "type": "Identifier", "value": name })
}

fn assignment_to_json(assignment: &Assignment) -> Value {
    json!({
        "type": "AssignmentExpression",
        "left": expr_to_json(&assignment.left),
        "operator": assignment.op.symbol(),
        "right": expr_to_json(&assignment.right),
    })
}

fn if_to_json(if_stmt: &IfStatement) -> Value {
    let (else_block, elif) = match &if_stmt.alternate {
        Some(ElseBranch::Else(block)) => (block_to_json(block), Value::Null),
        Some(ElseBranch::Elif(next)) => (Value::Null, if_to_json(next)),
        None => (Value::Null, Value::Null),
    };
    json!({
        "type": "IfStatement",
        "condition": expr_to_json(&if_stmt.condition),
        "thenBlock": block_to_json(&if_stmt.then_block),
        "elseBlock": else_block,
        "elif": elif,
    })
}

fn statement_to_json(stmt: &Statement) -> Value {
    match stmt {
        Statement::VariableDeclaration { name, scope, init } => json!({
            "type": "VariableDeclaration",
            "left": identifier(name),
            "scope": scope.keyword(),
            "init": init.as_ref().map(expr_to_json),
        }),
        Statement::FunctionDeclaration { name, params, body } => json!({
            "type": "FunctionDeclaration",
            "left": identifier(name),
            "params": params,
            "body": block_to_json(body),
        }),
        Statement::Return(values) => json!({
            "type": "ReturnStatement",
            "values": values.iter().map(expr_to_json).collect::<Vec<_>>(),
        }),
        Statement::If(if_stmt) => if_to_json(if_stmt),
        Statement::For {
            start,
            running,
            check,
            body,
        } => json!({
            "type": "ForLoop",
            "startExpr": assignment_to_json(start),
            "runningExpr": statement_to_json(running),
            "checkExpr": expr_to_json(check),
            "body": block_to_json(body),
        }),
        Statement::ForIn {
            value_name,
            object,
            body,
        } => json!({
            "type": "ForInLoop",
            "valueName": identifier(value_name),
            "object": expr_to_json(object),
            "body": block_to_json(body),
        }),
        Statement::Hardcode {
            start,
            stop,
            variable_name,
            body,
        } => json!({
            "type": "HardcodeLoop",
            "start": { "type": "Number", "value": number(*start) },
            "stop": { "type": "Number", "value": number(*stop) },
            "variableName": identifier(variable_name),
            "body": block_to_json(body),
        }),
        Statement::Assignment(assignment) => assignment_to_json(assignment),
        Statement::Expression(expr) => expr_to_json(expr),
    }
}

fn expr_to_json(expr: &Expr) -> Value {
    match expr {
        Expr::Number(n) => json!({ "type": "Number", "value": number(*n) }),
        Expr::Literal(s) => json!({ "type": "Literal", "value": s }),
        Expr::Identifier(name) => identifier(name),
        Expr::Selector(s) => json!({ "type": "Selector", "value": s }),
        Expr::Member { value, member } => json!({
            "type": "MemberExpression",
            "value": expr_to_json(value),
            "member": expr_to_json(member),
        }),
        Expr::SelectorAccess { value, selector } => json!({
            "type": "SelectorExpression",
            "value": expr_to_json(value),
            "selector": { "type": "Selector", "value": selector },
        }),
        Expr::Binary { op, left, right } => json!({
            "type": "BinaryExpression",
            "operator": op.symbol(),
            "left": expr_to_json(left),
            "right": expr_to_json(right),
        }),
        Expr::Call { callee, arguments } => json!({
            "type": "CallExpression",
            "callee": identifier(callee),
            "arguments": arguments.iter().map(expr_to_json).collect::<Vec<_>>(),
        }),
        Expr::Array(elements) => json!({
            "type": "ArrayExpression",
            "elements": elements.iter().map(expr_to_json).collect::<Vec<_>>(),
        }),
        Expr::Object(properties) => json!({
            "type": "ObjectExpression",
            "properties": properties
                .iter()
                .map(|p| json!({ "key": expr_to_json(&p.key), "value": expr_to_json(&p.value) }))
                .collect::<Vec<_>>(),
        }),
    }
}
