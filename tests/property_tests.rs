// Property-based tests for the transpiler pipeline
//
// 1. The lexer never panics and always reaches a repeatable end of input.
// 2. Chains of subtraction parse left-associatively.
// 3. The declaration check gives the same verdict when repeated.
// 4. Generated expressions re-parse to the same tree.

use kannadapy::codegen::CodeGenerator;
use kannadapy::parser::ast::{AstNode, BinOp, UnOp};
use kannadapy::parser::lexer::Lexer;
use kannadapy::parser::parse::Parser;
use kannadapy::semantic::SemanticChecker;
use proptest::prelude::*;

const NAMES: &[&str] = &["ಅ", "ಬ", "ಚ", "ಡ", "ಎಣಿಕೆ"];
const OPS: &[BinOp] = &[BinOp::Add, BinOp::Sub, BinOp::Mul, BinOp::Div, BinOp::Eq];

fn name() -> impl Strategy<Value = String> {
    prop::sample::select(NAMES).prop_map(|n| n.to_string())
}

fn expr() -> impl Strategy<Value = AstNode> {
    let leaf = prop_oneof![
        name().prop_map(|name| AstNode::Variable { name, line: 1 }),
        (0i32..100_000).prop_map(|value| AstNode::NumberLiteral { value, line: 1 }),
    ];

    leaf.prop_recursive(5, 48, 2, |inner| {
        prop_oneof![
            (prop::sample::select(OPS), inner.clone(), inner.clone())
                .prop_map(|(op, left, right)| AstNode::binary(op, left, right, 1)),
            inner.prop_map(|operand| AstNode::unary(UnOp::Neg, operand, 1)),
        ]
    })
}

/// Statements of the form `name = name;` or `ಮುದ್ರಿಸು name;`
fn statement_source() -> impl Strategy<Value = String> {
    prop_oneof![
        (name(), name()).prop_map(|(target, value)| format!("{} = {};", target, value)),
        name().prop_map(|n| format!("ಮುದ್ರಿಸು {};", n)),
    ]
}

/// Rewrites ASCII digits as Kannada digits so target text lexes as source.
fn to_source_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x0CE6 + d).unwrap(),
            None => c,
        })
        .collect()
}

fn is_left_leaning(node: &AstNode) -> bool {
    match node {
        AstNode::BinaryOp { left, right, .. } => {
            matches!(**right, AstNode::Variable { .. }) && is_left_leaning(left)
        }
        AstNode::Variable { .. } => true,
        _ => false,
    }
}

proptest! {
    #[test]
    fn lexer_reaches_repeatable_eof(input in any::<String>()) {
        let mut lexer = Lexer::new(&input);

        let mut reached_eof = false;
        for _ in 0..=input.len() {
            if lexer.next_token().is_eof() {
                reached_eof = true;
                break;
            }
        }
        prop_assert!(reached_eof);

        for _ in 0..3 {
            prop_assert!(lexer.next_token().is_eof());
        }
    }

    #[test]
    fn tokenize_ends_with_single_eof(statements in prop::collection::vec(statement_source(), 0..8)) {
        let source = statements.join("\n");
        let tokens = Lexer::new(&source).tokenize().unwrap();

        prop_assert!(tokens.last().unwrap().is_eof());
        prop_assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);
    }

    #[test]
    fn subtraction_chains_lean_left(names in prop::collection::vec(name(), 2..7)) {
        let source = format!("ಮುದ್ರಿಸು {};", names.join(" - "));
        let program = Parser::from_source(&source).unwrap().parse_program().unwrap();

        match &program.statements()[0] {
            AstNode::Print { expr, .. } => prop_assert!(is_left_leaning(expr)),
            other => prop_assert!(false, "Expected print, got {:?}", other),
        }
    }

    #[test]
    fn check_verdict_is_repeatable(statements in prop::collection::vec(statement_source(), 0..10)) {
        let source = statements.join("\n");
        let program = Parser::from_source(&source).unwrap().parse_program().unwrap();

        let mut checker = SemanticChecker::default();
        let first = checker.check(&program);
        let second = SemanticChecker::default().check(&program);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn generated_expressions_reparse(tree in expr()) {
        let statement = AstNode::Print { expr: Box::new(tree.clone()), line: 1 };
        let mut generator = CodeGenerator::new(Vec::new(), 4);
        generator.generate(&statement).unwrap();
        let output = String::from_utf8(generator.into_inner()).unwrap();

        let inner = output
            .strip_prefix("print(")
            .and_then(|rest| rest.strip_suffix(");\n"))
            .unwrap();
        let source = format!("ಮುದ್ರಿಸು {};", to_source_digits(inner));
        let program = Parser::from_source(&source).unwrap().parse_program().unwrap();

        match &program.statements()[0] {
            AstNode::Print { expr, .. } => prop_assert_eq!(&**expr, &tree),
            other => prop_assert!(false, "Expected print, got {:?}", other),
        }
    }
}
