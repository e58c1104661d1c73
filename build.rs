use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=frontend/dist");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let dist_path = Path::new(&manifest_dir).join("frontend/dist");

    if !dist_path.join("index.html").exists() {
        println!("cargo:warning=frontend/dist not found, embedding a placeholder page");
        write_placeholder(&dist_path);
    }
}

// rust-embed 要求目录在编译期存在
fn write_placeholder(dist_path: &Path) {
    fs::create_dir_all(dist_path.join("assets")).expect("Failed to create frontend/dist");

    let placeholder = r#"<!DOCTYPE html>
<html lang="ko">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>%APP_NAME%</title>
    <style>
        body { font-family: -apple-system, 'Noto Sans KR', sans-serif; max-width: 560px; margin: 96px auto; padding: 16px; text-align: center; }
        .notice { background: #eef4ff; border: 1px solid #c7d7fe; padding: 20px; border-radius: 8px; }
        code { background: #f1f3f4; padding: 2px 6px; border-radius: 4px; }
    </style>
</head>
<body>
    <h1>%APP_NAME%</h1>
    <div class="notice">
        <p>The admin console has not been built.</p>
        <p><code>cd frontend && bun install && bun run build</code></p>
        <p>The API is available under <code>/api/v1</code>.</p>
    </div>
</body>
</html>"#;

    fs::write(dist_path.join("index.html"), placeholder)
        .expect("Failed to write placeholder index.html");
}
