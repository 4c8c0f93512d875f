//! Golden samples — hand-authored records asserting known attack and normal
//! patterns, injected into every pool regardless of what real logs contain.

use crate::types::{Field, Label, StandardRecord};

/// Known attack shapes: SQL injection, reflected XSS, command injection,
/// path traversal and NoSQL operator injection.
pub fn attack_samples() -> Vec<StandardRecord> {
    let base = || StandardRecord::new(Label::Attack);
    vec![
        base()
            .with(Field::Path, "/api/users")
            .with(Field::Query, "id=1' OR '1'='1"),
        base()
            .with(Field::Path, "/search")
            .with(Field::Query, "q=<script>alert('XSS')</script>"),
        base()
            .with(Field::Path, "/api/ping")
            .with(Field::Body, r#"{"ip": "127.0.0.1; cat /etc/passwd"}"#),
        base()
            .with(Field::Path, "/view_file")
            .with(Field::Query, "file=../../../../etc/passwd"),
        base()
            .with(Field::Path, "/api/login")
            .with(Field::Body, r#"{"username": {"$gt": ""}, "password": {"$gt": ""}}"#),
    ]
}

/// Benign look-alikes: a browser hit on `/`, a form login and a JSON body.
pub fn normal_samples() -> Vec<StandardRecord> {
    let base = || StandardRecord::new(Label::Normal);
    vec![
        base().with(Field::Headers, "User-Agent: Mozilla/5.0"),
        base()
            .with(Field::Path, "/login")
            .with(Field::Body, "user=john&pass=doe"),
        base()
            .with(Field::Path, "/api/data")
            .with(Field::Body, r#"{"metadata": {"version": "1.0"}}"#),
    ]
}

pub fn samples(label: Label) -> Vec<StandardRecord> {
    match label {
        Label::Attack => attack_samples(),
        Label::Normal => normal_samples(),
    }
}
