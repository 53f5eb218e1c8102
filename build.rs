use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=frontend/dist");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let dist = Path::new(&manifest_dir).join("frontend/dist");

    // rust-embed 要求嵌入目录在编译期存在，未构建前端时生成占位产物
    if !dist.exists() {
        println!("cargo:warning=frontend/dist not found, generating placeholder assets");
        scaffold_placeholder(&dist);
    }
}

fn scaffold_placeholder(dist: &Path) {
    fs::create_dir_all(dist.join("assets")).expect("Failed to create frontend/dist");

    let index = "<!DOCTYPE html>\n\
<html lang=\"zh-CN\">\n\
<head><meta charset=\"UTF-8\"><title>课堂考勤系统</title></head>\n\
<body>\n\
  <h1>课堂考勤系统</h1>\n\
  <p>前端尚未构建，请先执行 <code>cd frontend &amp;&amp; npm run build</code>。</p>\n\
</body>\n\
</html>\n";
    fs::write(dist.join("index.html"), index).expect("Failed to write placeholder index.html");
    fs::write(dist.join("favicon.ico"), []).expect("Failed to write placeholder favicon");
}
