fn main() {
    color_shooter::game::run();
}
