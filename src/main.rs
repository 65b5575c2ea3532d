fn main() -> Result<(), Box<dyn std::error::Error>> {
    mp3shelf::runtime::run()
}
