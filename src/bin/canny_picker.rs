use shape_tuner::app::main_for;
use shape_tuner::Mode;

fn main() {
    main_for(Mode::Edges);
}
