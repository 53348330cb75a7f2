#[macro_export]
#[doc(hidden)]
macro_rules! cfg_sync {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "sync")]
            $item
        )*
    }
}

#[macro_export]
#[doc(hidden)]
macro_rules! cfg_profiler {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "profiler")]
            $item
        )*
    }
}
