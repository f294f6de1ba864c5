//! CPU, GPU, memory and storage dashboard

fn main() {
    waybar_probes::main_for(waybar_probes::Probe::Sysmon);
}
