mod distance_tests;
mod pqueue_tests;
