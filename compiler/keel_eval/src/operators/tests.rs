use super::*;
use keel_value::EvalErrorKind;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn int(n: i64) -> Value {
    Value::Integer(n)
}

fn kind(result: EvalResult) -> EvalErrorKind {
    match result {
        Err(e) => e.kind,
        Ok(v) => EvalErrorKind::Custom {
            message: format!("expected error, got {v:?}"),
        },
    }
}

mod boxing {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decimal_hex_octal() {
        assert_eq!(parse_number("42"), Some(Number::Int(42)));
        assert_eq!(parse_number("-7"), Some(Number::Int(-7)));
        assert_eq!(parse_number("+7"), Some(Number::Int(7)));
        assert_eq!(parse_number("0x1F"), Some(Number::Int(31)));
        assert_eq!(parse_number("-0xff"), Some(Number::Int(-255)));
        assert_eq!(parse_number("017"), Some(Number::Int(15)));
        assert_eq!(parse_number("0"), Some(Number::Int(0)));
    }

    #[test]
    fn floats() {
        assert_eq!(parse_number("1.5"), Some(Number::Float(1.5)));
        assert_eq!(parse_number("-2.5e2"), Some(Number::Float(-250.0)));
        assert_eq!(parse_number("0.25"), Some(Number::Float(0.25)));
    }

    #[test]
    fn rejects_non_numbers() {
        for text in ["", "-", "abc", "1a", "0x", "09", "inf", "NaN", " 1", "1e"] {
            assert_eq!(parse_number(text), None, "{text:?}");
        }
    }

    #[test]
    fn string_operands_convert() {
        assert_eq!(
            evaluate_arithmetic(ArithmeticOp::Add, &Value::string("3"), &int(4)).unwrap(),
            int(7)
        );
    }
}

mod integers {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn basic_ops() {
        let cases = [
            (ArithmeticOp::Add, 7, 3, 10),
            (ArithmeticOp::Sub, 7, 3, 4),
            (ArithmeticOp::Mul, 7, 3, 21),
            (ArithmeticOp::Div, 7, 3, 2),
            (ArithmeticOp::Mod, 7, 3, 1),
            (ArithmeticOp::Shl, 1, 4, 16),
            (ArithmeticOp::Shr, 16, 2, 4),
        ];
        for (op, a, b, expected) in cases {
            assert_eq!(
                evaluate_arithmetic(op, &int(a), &int(b)).unwrap(),
                int(expected),
                "{a} {} {b}",
                op.as_symbol()
            );
        }
    }

    #[test]
    fn division_floors() {
        assert_eq!(
            evaluate_arithmetic(ArithmeticOp::Div, &int(-7), &int(2)).unwrap(),
            int(-4)
        );
        assert_eq!(
            evaluate_arithmetic(ArithmeticOp::Mod, &int(-7), &int(2)).unwrap(),
            int(1)
        );
        assert_eq!(
            evaluate_arithmetic(ArithmeticOp::Mod, &int(7), &int(-2)).unwrap(),
            int(-1)
        );
    }

    #[test]
    fn negative_shift_reverses() {
        assert_eq!(
            evaluate_arithmetic(ArithmeticOp::Shl, &int(16), &int(-2)).unwrap(),
            int(4)
        );
        assert_eq!(
            evaluate_arithmetic(ArithmeticOp::Shr, &int(1), &int(-3)).unwrap(),
            int(8)
        );
        assert_eq!(
            evaluate_arithmetic(ArithmeticOp::Shr, &int(-1), &int(100)).unwrap(),
            int(-1)
        );
    }

    #[test]
    fn overflow_and_zero_are_runtime_errors() {
        for (op, a, b) in [
            (ArithmeticOp::Add, i64::MAX, 1),
            (ArithmeticOp::Mul, i64::MAX, 2),
            (ArithmeticOp::Div, 1, 0),
            (ArithmeticOp::Mod, 1, 0),
            (ArithmeticOp::Div, i64::MIN, -1),
            (ArithmeticOp::Shl, 1, 64),
            (ArithmeticOp::Shl, i64::MAX, 1),
        ] {
            assert!(
                matches!(
                    kind(evaluate_arithmetic(op, &int(a), &int(b))),
                    EvalErrorKind::RuntimeArithmetic { .. }
                ),
                "{a} {} {b}",
                op.as_symbol()
            );
        }
    }
}

mod floats {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mixed_widens_to_float() {
        assert_eq!(
            evaluate_arithmetic(ArithmeticOp::Add, &int(1), &Value::Float(0.5)).unwrap(),
            Value::Float(1.5)
        );
        assert_eq!(
            evaluate_arithmetic(ArithmeticOp::Div, &Value::Float(3.0), &int(2)).unwrap(),
            Value::Float(1.5)
        );
    }

    #[test]
    fn float_division_by_zero_fails() {
        assert!(matches!(
            kind(evaluate_arithmetic(ArithmeticOp::Div, &Value::Float(1.0), &int(0))),
            EvalErrorKind::RuntimeArithmetic { .. }
        ));
    }

    #[test]
    fn integer_only_operators_reject_floats() {
        let err = kind(evaluate_arithmetic(
            ArithmeticOp::Mod,
            &int(5),
            &Value::Float(2.0),
        ));
        assert_eq!(
            err,
            EvalErrorKind::OperatorNotApplicable {
                op: "%".into(),
                operand: Value::Float(2.0),
            }
        );
    }
}

#[test]
fn non_numeric_operand_is_runtime_error() {
    let err = kind(evaluate_arithmetic(
        ArithmeticOp::Mul,
        &Value::string("x"),
        &int(2),
    ));
    assert_eq!(
        err,
        EvalErrorKind::RuntimeArithmetic {
            op: "*".into(),
            operand: Value::string("x"),
            detail: "the value 'x' cannot be converted to Numeric".into(),
        }
    );
}

#[test]
fn runtime_errors_carry_the_offending_operand() {
    let operand_of = |result: EvalResult| match kind(result) {
        EvalErrorKind::RuntimeArithmetic { operand, .. } => operand,
        other => panic!("unexpected error kind: {other:?}"),
    };
    assert_eq!(
        operand_of(evaluate_arithmetic(ArithmeticOp::Add, &int(1), &Value::string("y"))),
        Value::string("y")
    );
    assert_eq!(
        operand_of(evaluate_arithmetic(ArithmeticOp::Div, &int(7), &int(0))),
        int(0)
    );
    assert_eq!(
        operand_of(evaluate_arithmetic(ArithmeticOp::Div, &Value::Float(1.0), &int(0))),
        Value::Float(0.0)
    );
    assert_eq!(
        operand_of(evaluate_arithmetic(ArithmeticOp::Add, &int(i64::MAX), &int(1))),
        int(i64::MAX)
    );
    assert_eq!(operand_of(negate(&int(i64::MIN))), int(i64::MIN));
}

#[test]
fn negate_values() {
    assert_eq!(negate(&int(3)).unwrap(), int(-3));
    assert_eq!(negate(&Value::Float(1.5)).unwrap(), Value::Float(-1.5));
    assert_eq!(negate(&Value::string("0x10")).unwrap(), int(-16));
    assert!(matches!(
        kind(negate(&Value::Bool(true))),
        EvalErrorKind::TypeCoercion { .. }
    ));
    assert!(matches!(
        kind(negate(&int(i64::MIN))),
        EvalErrorKind::RuntimeArithmetic { .. }
    ));
}

proptest! {
    #[test]
    fn add_and_mul_commute(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
        for op in [ArithmeticOp::Add, ArithmeticOp::Mul] {
            prop_assert_eq!(
                evaluate_arithmetic(op, &int(a), &int(b)).unwrap(),
                evaluate_arithmetic(op, &int(b), &int(a)).unwrap()
            );
        }
    }

    #[test]
    fn sub_is_antisymmetric(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
        let forward = evaluate_arithmetic(ArithmeticOp::Sub, &int(a), &int(b)).unwrap();
        let backward = evaluate_arithmetic(ArithmeticOp::Sub, &int(b), &int(a)).unwrap();
        prop_assert_eq!(forward, negate(&backward).unwrap());
    }

    #[test]
    fn float_add_commutes(a in -1.0e6f64..1.0e6, b in -1.0e6f64..1.0e6) {
        prop_assert_eq!(
            evaluate_arithmetic(ArithmeticOp::Add, &Value::Float(a), &Value::Float(b)).unwrap(),
            evaluate_arithmetic(ArithmeticOp::Add, &Value::Float(b), &Value::Float(a)).unwrap()
        );
    }

    #[test]
    fn floor_div_mod_identity(a in -10_000i64..10_000, b in prop_oneof![-100i64..-1, 1i64..100]) {
        let q = floor_div(a, b).unwrap();
        let r = floor_mod(a, b).unwrap();
        prop_assert_eq!(q * b + r, a);
    }
}
