fn main() {
    roster::cli::run();
}
