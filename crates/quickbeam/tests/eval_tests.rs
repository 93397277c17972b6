//! Evaluator semantics over the supported subset and its failures

use quickbeam::ast::{FunDecl, Operator, VarDecl};
use quickbeam::*;

fn eval(expr: &Expr) -> std::result::Result<i32, EvalError> {
    evaluate(expr, &Context::default())
}

fn bin(left: Expr, op: Operator, right: Expr) -> Expr {
    Expr::binary(left, op, right)
}

/// A node the evaluator rejects; reaching it shows a branch was visited.
fn probe() -> Expr {
    Expr::call("probe", vec![])
}

fn unsupported_kind(result: std::result::Result<i32, EvalError>) -> Option<NodeKind> {
    match result {
        Err(EvalError::Unsupported { kind, .. }) => Some(kind),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Arithmetic
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_literal() {
    assert_eq!(eval(&Expr::int(42)), Ok(42));
    assert_eq!(eval(&Expr::int(-1)), Ok(-1));
}

#[test]
fn test_eval_product_of_sum() {
    let tree = bin(
        bin(Expr::int(3), Operator::Plus, Expr::int(4)),
        Operator::Times,
        Expr::int(2),
    );
    assert_eq!(eval(&tree), Ok(14));
}

#[test]
fn test_operand_order() {
    assert_eq!(eval(&bin(Expr::int(10), Operator::Minus, Expr::int(3))), Ok(7));
    assert_eq!(eval(&bin(Expr::int(3), Operator::Minus, Expr::int(10))), Ok(-7));
    assert_eq!(eval(&bin(Expr::int(1), Operator::Lt, Expr::int(2))), Ok(1));
}

#[test]
fn test_truncating_division() {
    assert_eq!(eval(&bin(Expr::int(10), Operator::Divide, Expr::int(3))), Ok(3));
    assert_eq!(eval(&bin(Expr::int(-10), Operator::Divide, Expr::int(3))), Ok(-3));
}

#[test]
fn test_comparisons() {
    let cases = [
        (Operator::Eq, 5, 5, 1),
        (Operator::Neq, 5, 5, 0),
        (Operator::Lt, 4, 5, 1),
        (Operator::Le, 5, 5, 1),
        (Operator::Gt, 4, 5, 0),
        (Operator::Ge, 5, 4, 1),
    ];
    for (op, left, right, expected) in cases {
        assert_eq!(
            eval(&bin(Expr::int(left), op, Expr::int(right))),
            Ok(expected),
            "{} {} {}",
            left,
            op,
            right
        );
    }
}

#[test]
fn test_division_by_zero_is_reported() {
    let result = eval(&bin(Expr::int(1), Operator::Divide, Expr::int(0)));
    assert!(matches!(result, Err(EvalError::DivisionByZero { .. })));
}

#[test]
fn test_overflow_is_reported() {
    let result = eval(&bin(Expr::int(i32::MAX), Operator::Times, Expr::int(2)));
    assert!(matches!(
        result,
        Err(EvalError::IntegerOverflow {
            op: Operator::Times,
            ..
        })
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// Sequences and Conditionals
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_sequence_value_is_last() {
    let tree = Expr::seq(vec![Expr::int(1), Expr::int(2), Expr::int(3)]);
    assert_eq!(eval(&tree), Ok(3));
}

#[test]
fn test_sequence_as_operand() {
    // (1; 2) + 3 consumes 2 and 3, leaving 1 below the sum.
    let tree = bin(
        Expr::seq(vec![Expr::int(1), Expr::int(2)]),
        Operator::Plus,
        Expr::int(3),
    );
    let ctx = Context::default();
    let mut evaluator = Evaluator::new(&ctx);
    assert_eq!(evaluator.evaluate(&tree), Ok(5));
    assert_eq!(evaluator.stack().as_slice(), &[1, 5]);
}

#[test]
fn test_if_true_skips_else() {
    let tree = Expr::if_then_else(Expr::int(1), Expr::int(7), probe());
    assert_eq!(eval(&tree), Ok(7));
}

#[test]
fn test_if_false_skips_then() {
    let tree = Expr::if_then_else(Expr::int(0), probe(), Expr::int(99));
    assert_eq!(eval(&tree), Ok(99));
}

#[test]
fn test_if_any_nonzero_is_true() {
    let tree = Expr::if_then_else(Expr::int(-3), Expr::int(1), Expr::int(2));
    assert_eq!(eval(&tree), Ok(1));
}

#[test]
fn test_if_condition_is_consumed() {
    let tree = Expr::if_then_else(
        bin(Expr::int(2), Operator::Gt, Expr::int(1)),
        Expr::int(10),
        Expr::int(20),
    );
    let ctx = Context::default();
    let mut evaluator = Evaluator::new(&ctx);
    assert_eq!(evaluator.evaluate(&tree), Ok(10));
    assert_eq!(evaluator.stack().as_slice(), &[10]);
}

#[test]
fn test_nested_conditionals() {
    let tree = Expr::if_then_else(
        Expr::int(0),
        probe(),
        Expr::if_then_else(
            bin(Expr::int(3), Operator::Eq, Expr::int(3)),
            bin(Expr::int(6), Operator::Divide, Expr::int(2)),
            probe(),
        ),
    );
    assert_eq!(eval(&tree), Ok(3));
}

// ═══════════════════════════════════════════════════════════════════════
// Unsupported Constructs
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_fun_call_fails_before_later_siblings() {
    let tree = Expr::seq(vec![Expr::int(1), probe(), Expr::string("later")]);
    assert_eq!(unsupported_kind(eval(&tree)), Some(NodeKind::FunCall));
}

#[test]
fn test_every_unsupported_expression_kind() {
    let cases = [
        (Expr::string("s"), NodeKind::StringLiteral),
        (Expr::let_in(vec![], vec![Expr::int(1)]), NodeKind::Let),
        (Expr::ident("x"), NodeKind::Identifier),
        (probe(), NodeKind::FunCall),
        (Expr::while_loop(Expr::int(0), Expr::int(1)), NodeKind::WhileLoop),
        (
            Expr::for_loop("i", Expr::int(0), Expr::int(1), Expr::int(2)),
            NodeKind::ForLoop,
        ),
        (Expr::brk(), NodeKind::Break),
        (Expr::assign(Expr::ident("x"), Expr::int(1)), NodeKind::Assign),
    ];
    for (tree, kind) in cases {
        assert_eq!(unsupported_kind(eval(&tree)), Some(kind));
    }
}

#[test]
fn test_declarations_are_unsupported() {
    let ctx = Context::default();
    let mut evaluator = Evaluator::new(&ctx);

    let var: Decl = VarDecl::new("x", Some(Expr::int(1))).into();
    assert_eq!(
        unsupported_kind(evaluator.evaluate(&var)),
        Some(NodeKind::VarDecl)
    );

    let fun: Decl = FunDecl::new("f", vec![], Expr::int(1)).into();
    assert_eq!(
        unsupported_kind(evaluator.evaluate(&fun)),
        Some(NodeKind::FunDecl)
    );
}

#[test]
fn test_unsupported_inside_operand() {
    let tree = bin(Expr::int(1), Operator::Plus, Expr::string("2"));
    assert_eq!(unsupported_kind(eval(&tree)), Some(NodeKind::StringLiteral));
}

// ═══════════════════════════════════════════════════════════════════════
// Stack Underflow and Limits
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_operator_underflow() {
    let tree = bin(Expr::seq(vec![]), Operator::Plus, Expr::int(1));
    assert_eq!(
        eval(&tree),
        Err(EvalError::StackUnderflow {
            needed: 2,
            available: 1
        })
    );
}

#[test]
fn test_condition_underflow() {
    let tree = Expr::if_then_else(Expr::seq(vec![]), Expr::int(1), Expr::int(2));
    assert!(matches!(eval(&tree), Err(EvalError::StackUnderflow { .. })));
}

#[test]
fn test_empty_sequence_has_no_value() {
    assert!(matches!(
        eval(&Expr::seq(vec![])),
        Err(EvalError::StackUnderflow { .. })
    ));
}

#[test]
fn test_depth_limit() {
    let mut tree = Expr::int(0);
    for _ in 0..20 {
        tree = bin(tree, Operator::Plus, Expr::int(1));
    }
    let ctx = Context::default().with_max_depth(10);
    assert_eq!(
        evaluate(&tree, &ctx),
        Err(EvalError::NestingTooDeep { max: 10 })
    );
    assert_eq!(evaluate(&tree, &Context::default()), Ok(20));
}

#[test]
fn test_deeply_nested_sum() {
    let mut tree = Expr::int(0);
    for _ in 0..1_000 {
        tree = bin(Expr::int(1), Operator::Plus, tree);
    }
    assert_eq!(eval(&tree), Ok(1_000));
}

#[test]
fn test_verbose_does_not_change_result() {
    let tree = bin(Expr::int(6), Operator::Times, Expr::int(7));
    assert_eq!(evaluate(&tree, &Context::verbose()), Ok(42));
}
