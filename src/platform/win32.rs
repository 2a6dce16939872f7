use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Dwm::{DwmSetWindowAttribute, DWMWINDOWATTRIBUTE};
use windows::Win32::UI::Input::KeyboardAndMouse::GetAsyncKeyState;
use windows::Win32::UI::WindowsAndMessaging::{
    GetWindowLongPtrW, SetWindowLongPtrW, SetWindowPos, GWL_EXSTYLE, SWP_FRAMECHANGED,
    SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW,
};

/// Extract the Win32 HWND from a winit window.
pub fn get_hwnd(window: &winit::window::Window) -> HWND {
    let handle = window.window_handle().expect("window handle unavailable");
    match handle.as_raw() {
        RawWindowHandle::Win32(h) => HWND(h.hwnd.get() as *mut core::ffi::c_void),
        _ => panic!("expected Win32 window handle"),
    }
}

unsafe fn dwm_set(hwnd: HWND, attr: i32, value: u32) {
    let _ = DwmSetWindowAttribute(
        hwnd,
        DWMWINDOWATTRIBUTE(attr),
        &value as *const u32 as *const core::ffi::c_void,
        4,
    );
}

/// Apply overlay window styles for a transparent desktop background layer.
pub unsafe fn make_overlay(hwnd: HWND) {
    let style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);

    // WS_EX_NOREDIRECTIONBITMAP keeps DWM from creating a GDI redirection
    // surface — every pixel comes from the DirectComposition visual that
    // wgpu presents through. WS_EX_LAYERED would conflict with it.
    const WS_EX_LAYERED: isize = 0x00080000;
    const WS_EX_NOREDIRECTIONBITMAP: isize = 0x00200000;

    let new_style = (style & !WS_EX_LAYERED)
        | WS_EX_NOACTIVATE.0 as isize
        | WS_EX_TOOLWINDOW.0 as isize
        | WS_EX_NOREDIRECTIONBITMAP;
    SetWindowLongPtrW(hwnd, GWL_EXSTYLE, new_style);

    // Force DWM to recalculate the frame; cached frame info from before the
    // style change shows up as a white box otherwise.
    let _ = SetWindowPos(
        hwnd,
        HWND::default(),
        0,
        0,
        0,
        0,
        SWP_FRAMECHANGED | SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
    );

    dwm_set(hwnd, 2, 2); // DWMWA_NCRENDERING_POLICY = DWMNCRP_DISABLED, no 1px border
    dwm_set(hwnd, 33, 1); // DWMWA_WINDOW_CORNER_PREFERENCE = DWMWCP_DONOTROUND
    dwm_set(hwnd, 34, 0xFFFFFFFE); // DWMWA_BORDER_COLOR = DWMWA_COLOR_NONE
    dwm_set(hwnd, 38, 1); // DWMWA_SYSTEMBACKDROP_TYPE = DWMSBT_NONE, no Mica/blur
}

/// Set up the window as a transparent, click-through background overlay.
pub fn setup_overlay(window: &winit::window::Window) {
    window
        .set_cursor_hittest(false)
        .expect("failed to set cursor hittest");

    let hwnd = get_hwnd(window);
    unsafe {
        make_overlay(hwnd);
    }

    log::info!("Win32 overlay setup complete (click-through + no DWM frame)");
}

/// Check if the ESC key is currently pressed. Polled, because the
/// click-through window never receives keyboard events.
pub fn is_escape_pressed() -> bool {
    // VK_ESCAPE = 0x1B. High bit set = key is currently down.
    unsafe { GetAsyncKeyState(0x1B) & (0x8000u16 as i16) != 0 }
}
