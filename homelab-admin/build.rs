/// Re-embed the dashboard whenever any of its static files change.
fn main() {
    println!("cargo:rerun-if-changed=../dashboard");
}
