use sg_vrp::pipeline;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pipeline::run()
}
