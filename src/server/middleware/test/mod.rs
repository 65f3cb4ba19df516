mod session_guard;
