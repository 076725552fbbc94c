use famicore::cpu::state::Register;
use famicore::{Assembler, Cpu};

fn main() {
    env_logger::init();

    let source = "\
        main: LDX #0x08\n\
        LDA #0x00\n\
        loop: CLC\n\
        ADC #0x03\n\
        DEX\n\
        BNE loop\n\
        BRK";

    let mut asm = Assembler::new();
    let program = match asm.assemble_source(source) {
        Ok(bytes) => bytes.to_vec(),
        Err(e) => {
            eprintln!("assembly failed: {e}");
            std::process::exit(1);
        }
    };
    println!("assembled {} bytes", program.len());

    let mut cpu = Cpu::new();
    match cpu.load_and_run(&program) {
        Ok(interrupt) => {
            println!(
                "stopped on {:?}: A={:#04x} X={:#04x} P={:#04x} ({} cycles)",
                interrupt,
                cpu.register(Register::A),
                cpu.register(Register::X),
                cpu.register(Register::P),
                cpu.cycles()
            );
        }
        Err(e) => {
            eprintln!("execution failed: {e}");
            std::process::exit(1);
        }
    }
}
