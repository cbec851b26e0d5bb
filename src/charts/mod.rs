//! Charts module - static chart rendering

mod plotter;

pub use plotter::{
    render_availability_chart, render_challenge_chart, render_satisfaction_chart, ChartError,
};
