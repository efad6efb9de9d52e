fn main() {
    tinylang::cli::run();
}
