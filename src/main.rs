fn main() {
    if let Err(err) = wordcloud_layout::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
