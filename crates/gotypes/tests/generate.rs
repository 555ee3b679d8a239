//! Integration tests for gotypes: Go source trees in, TypeScript file out.

use gotypes::{Config, Error, Nullability, generate, generate_from_dirs};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const USER_MODELS: &str = r#"package models

import "time"

// User represents a registered account.
type User struct {
	ID        int       `json:"id"`
	Name      string    `json:"name"`
	Email     *string   `json:"email,omitempty"`
	Tags      []string  `json:"tags"`
	CreatedAt time.Time `json:"created_at"`
	Manager   *User     `json:"manager"`
	password  string
}

type Role string
"#;

const USER_CONTROLLER: &str = r#"package controllers

// UserRequest is the payload for creating a user.
type UserRequest struct {
	Name  string `json:"name" binding:"required"`
	Email string `json:"email" binding:"required,email"`
	Age   int    `json:"age,omitempty" validate:"gte=0,lte=130"`
}

type UserResponse struct {
	ID       int    `json:"id"`
	FullName string `json:"full_name"`
}

// CreateUser godoc
// @Summary Create a user
// @Param user body UserRequest true "User data"
// @Success 201 {object} UserResponse
// @Router /users [post]
func CreateUser() {}

// ListUsers godoc
// @Success 200 {array} UserResponse
// @Router /users [get]
func ListUsers() {}
"#;

const CATALOG: &str = r#"package models

import "mime/multipart"

type Category struct {
	Name string `json:"name"`
}

type Catalog struct {
	Items      []*Category           `json:"items"`
	ByID       map[int]*Category     `json:"by_id"`
	Parent     *Category             `json:"parent"`
	Attachment *multipart.FileHeader `json:"attachment"`
	Extras     []Extra               `json:"extras,omitempty"`
}

type CategoryList []*Category
"#;

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn run(roots: &[PathBuf], config: &Config) -> String {
    let out = TempDir::new().unwrap();
    let target = out.path().join("types.ts");
    generate_from_dirs(roots, &target, config).unwrap();
    std::fs::read_to_string(target).unwrap()
}

/// Everything after the header and lint marker.
fn body(text: &str) -> &str {
    let (_, rest) = text
        .split_once("/* eslint-disable */\n\n")
        .expect("header present");
    rest.trim_end()
}

#[test]
fn test_models_with_camel_case_fields() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "models/user.go", USER_MODELS);

    let text = run(&[dir.path().to_path_buf()], &Config::default());
    insta::assert_snapshot!(body(&text), @r"
    /**
     * User represents a registered account.
     */
    export interface User {
      id: number;
      name: string;
      email?: string | null;
      tags: string[];
      createdAt: string /* RFC3339 */;
      manager?: User | null;
      /**
       * Note: This is an unexported field. In Go code, it's defined with a lowercase identifier.
       * It cannot be accessed directly from outside the package.
       */
      password: string;
    }

    export type Role = string;
    ");
}

#[test]
fn test_header_lines() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "models/user.go", USER_MODELS);

    let text = run(&[dir.path().to_path_buf()], &Config::default());
    let lines: Vec<&str> = text.lines().take(6).collect();
    assert_eq!(lines[0], "// This file is auto-generated. Do not edit directly.");
    assert!(lines[1].starts_with("// Generated at: "));
    // YYYY-MM-DD HH:MM:SS
    assert_eq!(lines[1].len(), "// Generated at: ".len() + 19);
    assert_eq!(
        lines[2],
        "// Note: This file includes both exported and unexported types and fields."
    );
    assert_eq!(lines[3], "");
    assert_eq!(lines[4], "/* eslint-disable */");
    assert_eq!(lines[5], "");
}

#[test]
fn test_api_types_keep_wire_names_and_list_endpoints() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "controllers/user_controller.go", USER_CONTROLLER);

    let text = run(&[dir.path().to_path_buf()], &Config::default());
    insta::assert_snapshot!(body(&text), @r"
    /**
     * UserRequest is the payload for creating a user.
     *
     * @api Used in the following endpoints:
     * - post /users (Request)
     */
    export interface UserRequest {
      /**
       * @validation
       *   - binding: required
       */
      name: string;
      /**
       * @validation
       *   - binding: required,email
       */
      email: string;
      /**
       * @validation
       *   - validate: gte=0,lte=130
       */
      age?: number;
    }

    /**
     * @api Used in the following endpoints:
     * - post /users (Response)
     * - get /users (Response)
     */
    export interface UserResponse {
      id: number;
      full_name: string;
    }
    ");
}

#[test]
fn test_pointer_collections_and_placeholders() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "models/catalog.go", CATALOG);

    let text = run(&[dir.path().to_path_buf()], &Config::default());
    insta::assert_snapshot!(body(&text), @r"
    // Placeholders for undefined types
    type FileHeader = any;
    type Extra = any;

    export interface Category {
      name: string;
    }

    export interface Catalog {
      items?: (Category | null | undefined)[];
      byId: Record<number, Category>;
      parent?: Category | null;
      attachment?: FileHeader | null;
      extras?: Extra[];
    }

    export type CategoryList = (Category | null | undefined)[];
    ");
}

#[test]
fn test_null_style_and_map_values_from_config() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "models/catalog.go", CATALOG);

    let mut config = Config::default();
    config.typescript.element_nullability = Nullability::Null;
    config.typescript.nullable_map_values = true;
    config.extract.camel_case_fields = false;

    let text = run(&[dir.path().to_path_buf()], &config);
    assert!(text.contains("  items?: (Category | null)[];\n"));
    assert!(text.contains("  by_id: Record<number, Category | null>;\n"));
    assert!(text.contains("export type CategoryList = (Category | null)[];\n"));
}

#[test]
fn test_multiple_roots_first_declaration_wins() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write(first.path(), "models/user.go", USER_MODELS);
    write(
        second.path(),
        "models/user.go",
        "package other\n\ntype User struct {\n\tLegacy bool\n}\n\ntype Team struct {\n\tLead User\n}\n",
    );
    write(second.path(), "controllers/user_controller.go", USER_CONTROLLER);

    let roots = vec![first.path().to_path_buf(), second.path().to_path_buf()];
    let text = run(&roots, &Config::default());

    assert_eq!(text.matches("export interface User {").count(), 1);
    assert!(!text.contains("legacy"));
    let order: Vec<&str> = text
        .lines()
        .filter_map(|l| l.strip_prefix("export "))
        .collect();
    assert_eq!(
        order,
        vec![
            "interface User {",
            "type Role = string;",
            "interface UserRequest {",
            "interface UserResponse {",
            "interface Team {",
        ]
    );
    assert!(text.contains(" * - post /users (Request)"));
}

#[test]
fn test_endpoints_from_other_root_attach() {
    let models = TempDir::new().unwrap();
    let handlers = TempDir::new().unwrap();
    write(
        models.path(),
        "dto.go",
        "package dto\n\ntype LoginForm struct {\n\tUser string `form:\"user\"`\n}\n",
    );
    write(
        handlers.path(),
        "auth.go",
        "package auth\n\n\
         // Login godoc\n\
         // @Param login body dto.LoginForm true \"credentials\"\n\
         // @Success 200 {object} dto.LoginForm\n\
         // @Success 400 {object} dto.LoginForm\n\
         // @Router /auth/login [post]\n\
         func Login() {}\n",
    );

    let roots = vec![models.path().to_path_buf(), handlers.path().to_path_buf()];
    let text = run(&roots, &Config::default());
    assert_eq!(text.matches(" * - post /auth/login").count(), 1);
    assert!(text.contains(" * - post /auth/login (Response, Request)\n"));
}

#[test]
fn test_output_is_stable_apart_from_timestamp() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "models/user.go", USER_MODELS);
    write(dir.path(), "models/catalog.go", CATALOG);
    write(dir.path(), "controllers/user_controller.go", USER_CONTROLLER);

    let roots = vec![dir.path().to_path_buf()];
    let strip = |text: String| -> Vec<String> {
        text.lines()
            .filter(|l| !l.starts_with("// Generated at:"))
            .map(str::to_string)
            .collect()
    };
    let first = strip(run(&roots, &Config::default()));
    let second = strip(run(&roots, &Config::default()));
    assert_eq!(first, second);
}

#[test]
fn test_broken_file_is_skipped() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "models/user.go", USER_MODELS);
    write(dir.path(), "models/broken.go", "package models\n\ntype Broken struct {\n");
    let target = dir.path().join("types.ts");

    let report = generate(dir.path(), &target, &Config::default()).unwrap();
    assert_eq!(report.skipped_files.len(), 1);
    let text = std::fs::read_to_string(&target).unwrap();
    assert!(text.contains("export interface User {"));
    assert!(!text.contains("Broken"));
}

#[test]
fn test_missing_root_is_fatal() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("types.ts");
    let err = generate(&dir.path().join("nope"), &target, &Config::default()).unwrap_err();
    assert!(matches!(err, Error::Walk { .. }));
    assert!(!target.exists());
}

#[test]
fn test_unwritable_target_is_fatal() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "models/user.go", USER_MODELS);
    let target = dir.path().join("missing-dir").join("types.ts");
    let err = generate(dir.path(), &target, &Config::default()).unwrap_err();
    assert!(matches!(err, Error::Write { .. }));
}
