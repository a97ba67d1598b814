pub mod u508_simulate_return;
