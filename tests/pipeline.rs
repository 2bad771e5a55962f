//! End-to-end tests for the para pipeline.

use para_lang::backend::{ExecutionBackend, PythonBackend};
use para_lang::frontend::ast::{Expr, Stmt};
use para_lang::frontend::lexer::kinds;
use para_lang::frontend::semantic::AnalyzedRecord;
use para_lang::frontend::token::TokenKind;
use para_lang::{analyze, compile, generate, parse, scan, Error};
use pretty_assertions::assert_eq;

#[test]
fn test_range_loop_pipeline() {
    let source = "para x no intervalo 5 : escreva x";

    let tokens = scan(source).expect("Failed to scan");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::For,
            TokenKind::Identifier,
            TokenKind::In,
            TokenKind::Range,
            TokenKind::Integer,
            TokenKind::Colon,
            TokenKind::Print,
            TokenKind::Identifier,
        ]
    );

    let program = parse(tokens).expect("Failed to parse");
    let for_loop = match &program.statements[..] {
        [Stmt::ForLoop(f)] => f,
        other => panic!("expected one loop, got {:?}", other),
    };
    assert_eq!(for_loop.variable.name, "x");
    match &for_loop.iterable {
        Expr::Range(r) => {
            assert!(matches!(r.start.as_ref(), Expr::Integer(l) if l.text == "0"));
            assert!(matches!(r.end.as_ref(), Expr::Integer(l) if l.text == "5"));
        }
        other => panic!("expected range, got {:?}", other),
    }

    let records = analyze(&program).expect("Failed to analyze");
    assert_eq!(records.len(), 1);

    let code = generate(&records).expect("Failed to generate");
    assert_eq!(code, "for x in range(0, 5):\n    print(x)");
}

#[test]
fn test_two_argument_range() {
    let code = compile("para i no intervalo 1 , 10 : escreva i").unwrap();
    assert_eq!(code, "for i in range(1, 10):\n    print(i)");
}

#[test]
fn test_unrecognized_symbol() {
    let err = compile("para x no intervalo 5 : escreva x #").unwrap_err();
    assert!(matches!(err, Error::Lexical { ref character, .. } if character == "#"));
}

#[test]
fn test_letter_glued_to_integer_is_passed_over() {
    let code = compile("para i no intervalo 1x : escreva i").unwrap();
    assert_eq!(code, "for i in range(0, 1):\n    print(i)");
}

#[test]
fn test_accented_letter_is_reported() {
    let err = compile("para i no intervalo 3 : escreva olá").unwrap_err();
    assert!(matches!(err, Error::Lexical { ref character, .. } if character == "á"));
}

#[test]
fn test_undeclared_second_identifier() {
    let err = compile("para y no intervalo 3 : escreva z").unwrap_err();
    assert!(matches!(err, Error::UndeclaredVariable { ref name, .. } if name == "z"));
}

#[test]
fn test_empty_input_flows_through_every_stage() {
    let tokens = scan("").unwrap();
    assert!(tokens.is_empty());
    let program = parse(tokens).unwrap();
    assert!(program.statements.is_empty());
    let records = analyze(&program).unwrap();
    assert!(records.is_empty());
    assert_eq!(generate(&records).unwrap(), "");
}

#[test]
fn test_keyword_text_never_lexes_as_identifier() {
    for keyword in ["para", "no", "intervalo", "escreva", "Para", "ESCREVA"] {
        let tokens = scan(keyword).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_ne!(tokens[0].kind, TokenKind::Identifier, "{} lexed as identifier", keyword);
    }
}

#[test]
fn test_parse_error_names_first_offending_token() {
    // Both `escreva` and the stray `)` are wrong; only the first is reported
    let err = compile("para x no intervalo 5 escreva x )").unwrap_err();
    match err {
        Error::UnexpectedToken { got, .. } => assert_eq!(got, "PRINT 'escreva'"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_multiline_program() {
    let source = "para i no intervalo 3 : escreva i\n\
                  para i no intervalo (10, 12) : escreva 'linha'\n";
    let code = compile(source).unwrap();
    assert_eq!(
        code,
        "for i in range(0, 3):\n    print(i)\nfor i in range(10, 12):\n    print('linha')"
    );
}

#[test]
fn test_records_survive_json() {
    let records = analyze(&parse(scan("para i no intervalo 2, 4 : escreva i").unwrap()).unwrap())
        .unwrap();
    let json = serde_json::to_string(&records).unwrap();
    let restored: Vec<AnalyzedRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(generate(&restored).unwrap(), generate(&records).unwrap());
}

#[test]
fn test_generated_code_reproduces_printed_lines() {
    let backend = match PythonBackend::discover() {
        Ok(backend) => backend,
        Err(_) => return,
    };

    let code = compile("para i no intervalo 1, 4 : escreva i para i no intervalo 2 : escreva 'oi'")
        .unwrap();
    let output = backend.execute(&code).unwrap();
    assert_eq!(output.lines(), vec!["1", "2", "3", "oi", "oi"]);
}
