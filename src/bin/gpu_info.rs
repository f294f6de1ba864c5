//! GPU load, temperature, power and clock

fn main() {
    waybar_probes::main_for(waybar_probes::Probe::Gpu);
}
