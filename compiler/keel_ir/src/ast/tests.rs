use super::*;
use crate::Span;
use pretty_assertions::assert_eq;

fn node(kind: ExprKind) -> Expr {
    Expr::new(kind, Span::DUMMY)
}

#[test]
fn literal_kinds_have_distinct_names() {
    assert_eq!(
        node(ExprKind::Literal(Literal::Integer(1))).kind_name(),
        "LiteralInteger"
    );
    assert_eq!(
        node(ExprKind::Literal(Literal::String("a".into()))).kind_name(),
        "LiteralString"
    );
    assert_eq!(node(ExprKind::Regex("a".into())).kind_name(), "LiteralRegex");
}

#[test]
fn unary_kind_name_follows_operator() {
    let operand = Box::new(node(ExprKind::Undef));
    let not = ExprKind::Unary {
        op: UnaryOp::Not,
        operand: operand.clone(),
    };
    let neg = ExprKind::Unary {
        op: UnaryOp::Neg,
        operand,
    };
    assert_eq!(not.name(), "Not");
    assert_eq!(neg.name(), "UnaryMinus");
}

#[test]
fn compound_assign_symbols() {
    assert_eq!(AssignOp::Assign.as_symbol(), "=");
    assert_eq!(AssignOp::ADD.as_symbol(), "+=");
    assert_eq!(AssignOp::SUB.as_symbol(), "-=");
    assert_eq!(AssignOp::Compound(ArithmeticOp::Shl).as_symbol(), "<<=");
}

#[test]
fn collection_ops() {
    assert!(ArithmeticOp::Add.is_collection_op());
    assert!(ArithmeticOp::Sub.is_collection_op());
    assert!(ArithmeticOp::Shl.is_collection_op());
    assert!(!ArithmeticOp::Mul.is_collection_op());
    assert!(!ArithmeticOp::Shr.is_collection_op());
}

#[test]
fn relationship_symbols() {
    assert_eq!(RelationshipOp::Before.as_symbol(), "->");
    assert_eq!(RelationshipOp::Notify.as_symbol(), "~>");
    assert_eq!(RelationshipOp::After.as_symbol(), "<-");
    assert_eq!(RelationshipOp::Subscribe.as_symbol(), "<~");
}

#[test]
fn lambda_required_count() {
    let lambda = LambdaExpr {
        params: vec![
            Param {
                name: "a".into(),
                default: None,
                span: Span::DUMMY,
            },
            Param {
                name: "b".into(),
                default: Some(node(ExprKind::Literal(Literal::Integer(10)))),
                span: Span::DUMMY,
            },
        ],
        body: Box::new(node(ExprKind::Nop)),
        span: Span::DUMMY,
    };
    assert_eq!(lambda.required_count(), 1);
    assert!(lambda.params[0].is_required());
    assert!(!lambda.params[1].is_required());
}
