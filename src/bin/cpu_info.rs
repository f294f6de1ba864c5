//! CPU load and temperature

fn main() {
    waybar_probes::main_for(waybar_probes::Probe::Cpu);
}
