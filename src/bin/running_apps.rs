//! Glyphs for running applications

fn main() {
    waybar_probes::main_for(waybar_probes::Probe::Apps);
}
