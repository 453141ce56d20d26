fn main() {
    if let Err(err) = decision_tree_svg::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
