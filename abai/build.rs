fn main() {
    println!("cargo::rerun-if-env-changed=RUST_LOG_PRETTY");
    println!("cargo::rustc-check-cfg=cfg(tracing_pretty)");

    let pretty = matches!(
        std::env::var("RUST_LOG_PRETTY").as_deref(),
        Ok("1" | "true")
    );
    if pretty {
        println!("cargo::rustc-cfg=tracing_pretty");
    }
}
