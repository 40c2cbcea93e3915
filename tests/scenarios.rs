//! End-to-end behavior of the query pipeline over fixture programs.

use astql::{execute, parse, validate, ExecuteOptions, Program, QueryResult};

fn fixture() -> Program {
    Program::from_sources([
        (
            "src/models.ts",
            r#"
export interface User { id: number; name: string; }
export interface Product { id: number; }
export type UserId = number;
export enum Role { Admin, Guest }
"#,
        ),
        (
            "src/services/user.ts",
            r#"
import { User, UserId } from '../models';

export class UserService {
    private cache: User[] = [];

    findById(id: UserId): User | undefined {
        return this.cache.find((u) => u.id === id);
    }
}
"#,
        ),
        (
            "src/services/product.ts",
            r#"
import { Product } from '../models';

export class ProductService {
    list(): Product[] { return []; }
}

class TestService {
    run(): void {}
}
"#,
        ),
    ])
    .unwrap()
}

fn run(program: &Program, query: &str) -> QueryResult {
    execute(program, &parse(query).unwrap(), &ExecuteOptions::default()).unwrap()
}

fn names(program: &Program, result: &QueryResult) -> Vec<String> {
    result
        .matches
        .iter()
        .filter_map(|&m| program.record(m).name.clone())
        .collect()
}

#[test]
fn repeated_execution_is_bit_identical() {
    let program = fixture();
    let descriptor = parse("SELECT * FROM * WHERE kind LIKE '%Declaration'").unwrap();
    let options = ExecuteOptions::default();

    let first = execute(&program, &descriptor, &options).unwrap();
    let second = execute(&program, &descriptor, &options).unwrap();
    let third = execute(&program, &descriptor, &options).unwrap();
    assert_eq!(first.matches, second.matches);
    assert_eq!(second.matches, third.matches);
}

#[test]
fn and_returns_the_intersection_in_collection_order() {
    let program = fixture();

    let p1 = run(&program, "SELECT * FROM ClassDeclaration WHERE name LIKE '%Service'");
    let p2 = run(&program, "SELECT * FROM ClassDeclaration WHERE modifier = 'export'");
    let both = run(
        &program,
        "SELECT * FROM ClassDeclaration WHERE name LIKE '%Service' AND modifier = 'export'",
    );

    let expected: Vec<_> = p1
        .matches
        .iter()
        .filter(|m| p2.matches.contains(m))
        .copied()
        .collect();
    assert_eq!(both.matches, expected);
    assert_eq!(names(&program, &both), vec!["UserService", "ProductService"]);
}

#[test]
fn like_and_not_like_partition_named_declarations() {
    let program = fixture();

    let like = run(&program, "SELECT * FROM ClassDeclaration WHERE name LIKE '%Service'");
    let not_like = run(
        &program,
        "SELECT * FROM ClassDeclaration WHERE name NOT LIKE '%Service'",
    );
    let all = run(&program, "SELECT * FROM ClassDeclaration");

    // Every class has a name, so LIKE and NOT LIKE partition the set.
    assert_eq!(like.matches.len() + not_like.matches.len(), all.matches.len());
    assert!(like.matches.iter().all(|m| !not_like.matches.contains(m)));
}

#[test]
fn in_and_not_in_partition_named_declarations() {
    let program = fixture();

    let list = "('UserService', 'ProductService')";
    let inside = run(
        &program,
        &format!("SELECT * FROM ClassDeclaration WHERE name IN {list}"),
    );
    let outside = run(
        &program,
        &format!("SELECT * FROM ClassDeclaration WHERE name NOT IN {list}"),
    );
    let all = run(&program, "SELECT * FROM ClassDeclaration");

    assert_eq!(inside.matches.len() + outside.matches.len(), all.matches.len());
    assert_eq!(names(&program, &outside), vec!["TestService"]);
}

#[test]
fn modifier_absence_breaks_the_partition() {
    let program = fixture();

    // TestService has no modifiers, so it fails both the positive and the
    // negated predicate and the partition excludes it.
    let with = run(&program, "SELECT * FROM ClassDeclaration WHERE modifier = 'export'");
    let without = run(&program, "SELECT * FROM ClassDeclaration WHERE modifier != 'export'");
    let all = run(&program, "SELECT * FROM ClassDeclaration");

    assert_eq!(with.matches.len(), 2);
    assert_eq!(without.matches.len(), 0);
    assert_eq!(all.matches.len(), 3);
}

#[test]
fn validate_agrees_with_parse() {
    let queries = [
        "SELECT * FROM InterfaceDeclaration",
        "SELECT * FROM ClassDeclaration WHERE name LIKE '%Service' WITH REFERENCES",
        "SELECT * FROM *",
        "SELECT * FROM SourceFile WHERE extension = '.ts'",
        "INVALID QUERY",
        "SELECT * FROM PivotTable",
        "",
    ];
    for query in queries {
        assert_eq!(
            validate(query).valid,
            parse(query).is_ok(),
            "validate/parse disagree on {query:?}"
        );
    }
}

#[test]
fn path_predicates_scope_by_directory() {
    let program = fixture();
    let result = run(
        &program,
        "SELECT * FROM ClassDeclaration WHERE path LIKE '%/services/%'",
    );
    assert_eq!(
        names(&program, &result),
        vec!["UserService", "ProductService", "TestService"]
    );
}

#[test]
fn file_iteration_order_drives_match_order() {
    let program = fixture();
    let result = run(&program, "SELECT * FROM SourceFile");
    let paths: Vec<_> = result
        .matches
        .iter()
        .map(|&m| program.file(m.file).path_str())
        .collect();
    assert_eq!(
        paths,
        vec!["src/models.ts", "src/services/user.ts", "src/services/product.ts"]
    );
}

#[test]
fn references_span_files_and_include_the_declaration_site() {
    let program = fixture();
    let result = run(
        &program,
        "SELECT * FROM TypeAliasDeclaration WHERE name = 'UserId' WITH REFERENCES",
    );
    assert_eq!(result.matches.len(), 1);

    let references = result.references.unwrap();
    let occurrences = references.get(&result.matches[0]).unwrap();
    // Declaration site, import specifier, parameter annotation.
    assert_eq!(occurrences.len(), 3);
    assert_eq!(occurrences[0].file, result.matches[0].file);

    let files: Vec<_> = occurrences.iter().map(|o| o.file).collect();
    assert!(files.windows(2).all(|w| w[0] <= w[1]), "file-then-position order");
}

#[test]
fn truncation_applies_after_reference_resolution() {
    let program = fixture();
    let options = ExecuteOptions {
        file_patterns: Vec::new(),
        max_results: Some(1),
    };
    let descriptor = parse("SELECT * FROM InterfaceDeclaration WITH REFERENCES").unwrap();
    let result = execute(&program, &descriptor, &options).unwrap();

    assert_eq!(result.matches.len(), 1);
    // Reference lists are never truncated; resolution ran for every
    // surviving declaration before the match list was cut.
    assert_eq!(result.references.unwrap().len(), 2);
}

#[test]
fn wildcard_includes_source_file_records() {
    let program = fixture();
    let result = run(&program, "SELECT * FROM * WHERE kind = 'SourceFile'");
    assert_eq!(result.matches.len(), 3);
}

#[test]
fn glob_scope_composes_with_predicates() {
    let program = fixture();
    let options = ExecuteOptions {
        file_patterns: vec!["**/services/*.ts".to_string()],
        max_results: None,
    };
    let descriptor =
        parse("SELECT * FROM ClassDeclaration WHERE name NOT IN ('TestService')").unwrap();
    let result = execute(&program, &descriptor, &options).unwrap();
    assert_eq!(names(&program, &result), vec!["UserService", "ProductService"]);
}
