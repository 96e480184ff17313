mod tcp_reachability;

pub use tcp_reachability::TcpReachability;
