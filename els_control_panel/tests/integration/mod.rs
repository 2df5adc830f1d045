mod control_loop;
mod gears;
mod simulation;
mod support;
