fn main() {
    ecolens_lib::run()
}
